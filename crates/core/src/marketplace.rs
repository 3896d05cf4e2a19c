//! Port for the remote marketplace service.
//!
//! The conversational layer talks to the server exclusively through this
//! trait so tests can substitute a recording fake for the HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::domain::seller::{Seller, SellerId};
use crate::errors::ApiError;

/// Request body for registering a seller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSeller {
    pub name: String,
    pub email: String,
}

/// Request body for adding a product to a seller's catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: u32,
}

/// Request body for replacing a product's stock level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub stock: u32,
}

/// Service liveness as reported by the health endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn list_sellers(&self) -> Result<Vec<Seller>, ApiError>;

    async fn create_seller(&self, seller: &NewSeller) -> Result<Seller, ApiError>;

    async fn get_seller(&self, id: &SellerId) -> Result<Seller, ApiError>;

    async fn add_product(
        &self,
        seller_id: &SellerId,
        product: &NewProduct,
    ) -> Result<Product, ApiError>;

    async fn update_stock(
        &self,
        seller_id: &SellerId,
        product_id: &ProductId,
        update: StockUpdate,
    ) -> Result<Product, ApiError>;

    async fn low_stock_products(&self, seller_id: &SellerId) -> Result<Vec<Product>, ApiError>;
}
