use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use sellery_core::config::ApiConfig;
use sellery_core::domain::product::{Product, ProductId};
use sellery_core::domain::seller::{Seller, SellerId};
use sellery_core::errors::ApiError;
use sellery_core::marketplace::{HealthStatus, MarketplaceApi, NewProduct, NewSeller, StockUpdate};

/// HTTP adapter for the marketplace service.
///
/// One call per operation, no retries. Every request carries the configured
/// timeout, and every failure is folded into [`ApiError`] before it leaves
/// this crate.
#[derive(Clone, Debug)]
pub struct HttpMarketplace {
    client: Client,
    base_url: String,
}

impl HttpMarketplace {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self.client.get(self.url(path)).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let response =
            self.client.post(self.url(path)).json(body).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(path, "PATCH");
        let response =
            self.client.patch(self.url(path)).json(body).send().await.map_err(transport)?;
        decode(response).await
    }
}

#[async_trait]
impl MarketplaceApi for HttpMarketplace {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/actuator/health").await
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, ApiError> {
        self.get_json("/api/sellers").await
    }

    async fn create_seller(&self, seller: &NewSeller) -> Result<Seller, ApiError> {
        self.post_json("/api/sellers", seller).await
    }

    async fn get_seller(&self, id: &SellerId) -> Result<Seller, ApiError> {
        self.get_json(&format!("/api/sellers/{}", id.0)).await
    }

    async fn add_product(
        &self,
        seller_id: &SellerId,
        product: &NewProduct,
    ) -> Result<Product, ApiError> {
        self.post_json(&format!("/api/sellers/{}/products", seller_id.0), product).await
    }

    async fn update_stock(
        &self,
        seller_id: &SellerId,
        product_id: &ProductId,
        update: StockUpdate,
    ) -> Result<Product, ApiError> {
        let path = format!("/api/sellers/{}/products/{}/stock", seller_id.0, product_id.0);
        self.patch_json(&path, &update).await
    }

    async fn low_stock_products(&self, seller_id: &SellerId) -> Result<Vec<Product>, ApiError> {
        self.get_json(&format!("/api/sellers/{}/products/low-stock", seller_id.0)).await
    }
}

fn transport(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

/// Fold a response into the caller's expected type. A 2xx body that fails to
/// parse is reported as malformed rather than as a status error; a non-2xx
/// body is mined for the server's `message` field.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        return response.json::<T>().await.map_err(|_| ApiError::MalformedBody);
    }

    let details = match response.text().await {
        Ok(body) => serde_json::from_str::<Value>(&body).ok(),
        Err(_) => None,
    };
    let message = details
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("API Error: HTTP {}", status.as_u16()));

    Err(ApiError::Status { status: status.as_u16(), message, details })
}
