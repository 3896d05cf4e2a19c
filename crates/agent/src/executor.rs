use serde_json::{json, Value};
use tracing::{error, info};

use sellery_core::dialogue::CommandRequest;
use sellery_core::domain::product::ProductId;
use sellery_core::domain::seller::SellerId;
use sellery_core::errors::{ApiError, ClientError};
use sellery_core::marketplace::{MarketplaceApi, NewProduct, NewSeller, StockUpdate};
use sellery_core::session::Session;

/// Description attached to products created through the conversational flow,
/// which collects no description slot.
pub const DEFAULT_PRODUCT_DESCRIPTION: &str = "Product added via natural language query";

/// Result of one executed command: a line for the user plus the payload the
/// call returned.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionOutcome {
    pub summary: String,
    pub details: Value,
}

/// Map a completed command onto exactly one marketplace call, then update
/// the selected entities and append the exchange to the session history.
pub(crate) async fn execute<A: MarketplaceApi>(
    api: &A,
    session: &mut Session,
    request: CommandRequest,
) -> Result<ExecutionOutcome, ClientError> {
    match request {
        CommandRequest::CreateSeller { name, email } => {
            let payload = NewSeller { name, email };
            let seller = checked("create_seller", api.create_seller(&payload).await)?;

            let details = json!({ "request": payload, "response": seller });
            session.record("create_seller", details.clone());
            session.current_seller = Some(seller.clone());
            info!(name = %seller.name, email = %seller.email, "created seller");

            Ok(ExecutionOutcome {
                summary: format!("Seller created successfully! ID: {}", seller.id.0),
                details,
            })
        }

        CommandRequest::SelectSeller { seller_id } => {
            let seller = checked("get_seller", api.get_seller(&seller_id).await)?;

            let details = json!({ "seller_id": seller_id.0, "response": seller });
            session.record("get_seller", details.clone());
            session.current_seller = Some(seller.clone());
            info!(name = %seller.name, "retrieved seller");

            Ok(ExecutionOutcome {
                summary: format!("Selected seller {} (ID: {})", seller.name, seller.id.0),
                details,
            })
        }

        CommandRequest::AddProduct { name, price, stock } => {
            let seller_id = require_seller(session)?;

            let payload = NewProduct {
                name,
                description: DEFAULT_PRODUCT_DESCRIPTION.to_string(),
                price,
                stock,
            };
            let product = checked("add_product", api.add_product(&seller_id, &payload).await)?;

            let details =
                json!({ "seller_id": seller_id.0, "request": payload, "response": product });
            session.record("add_product", details.clone());
            session.current_product = Some(product.clone());
            info!(name = %product.name, price = product.price, "added product");

            Ok(ExecutionOutcome {
                summary: format!("Product added successfully! ID: {}", product.id.0),
                details,
            })
        }

        CommandRequest::UpdateStock { new_stock } => {
            let seller_id = require_seller(session)?;
            let product_id = require_product(session)?;

            let update = StockUpdate { stock: new_stock };
            let product =
                checked("update_stock", api.update_stock(&seller_id, &product_id, update).await)?;

            let details = json!({
                "seller_id": seller_id.0,
                "product_id": product_id.0,
                "new_stock": new_stock,
                "response": product,
            });
            session.record("update_stock", details.clone());
            session.current_product = Some(product.clone());
            info!(product_id = %product_id.0, new_stock, "updated stock");

            Ok(ExecutionOutcome {
                summary: format!(
                    "Stock updated successfully! {} now has {} units",
                    product.name, product.stock
                ),
                details,
            })
        }

        CommandRequest::ListSellers => {
            let sellers = checked("list_sellers", api.list_sellers().await)?;

            let details = json!({ "response": sellers });
            session.record("list_sellers", details.clone());

            let mut summary = format!("Found {} sellers", sellers.len());
            for seller in &sellers {
                summary.push_str(&format!(
                    "\n- {} ({}) [ID: {}]",
                    seller.name, seller.email, seller.id.0
                ));
            }
            Ok(ExecutionOutcome { summary, details })
        }

        CommandRequest::LowStockReport => {
            let seller_id = require_seller(session)?;

            let products = checked("get_low_stock", api.low_stock_products(&seller_id).await)?;

            let details = json!({ "seller_id": seller_id.0, "response": products });
            session.record("get_low_stock", details.clone());
            info!(count = products.len(), "found products with low stock");

            let mut summary = format!("Found {} products with low stock", products.len());
            for product in &products {
                summary.push_str(&format!("\n- {}: {} units", product.name, product.stock));
            }
            Ok(ExecutionOutcome { summary, details })
        }

        CommandRequest::CheckHealth => {
            let health = checked("health_check", api.health().await)?;

            let details = json!({ "status": health });
            session.record("health_check", details.clone());

            Ok(ExecutionOutcome {
                summary: format!("Server status: {}", health.status),
                details,
            })
        }
    }
}

fn require_seller(session: &Session) -> Result<SellerId, ClientError> {
    session
        .current_seller
        .as_ref()
        .map(|seller| seller.id.clone())
        .ok_or(ClientError::SellerNotSelected)
}

fn require_product(session: &Session) -> Result<ProductId, ClientError> {
    session
        .current_product
        .as_ref()
        .map(|product| product.id.clone())
        .ok_or(ClientError::ProductNotSelected)
}

fn checked<T>(operation: &'static str, result: Result<T, ApiError>) -> Result<T, ClientError> {
    result.map_err(|error| {
        error!(operation, %error, "marketplace call failed");
        ClientError::from(error)
    })
}
