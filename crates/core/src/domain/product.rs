use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// A product as returned by the marketplace API. Schema ownership sits with
/// the server; unread fields ride along in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Product;

    #[test]
    fn parses_api_payload_and_keeps_extras() {
        let raw = json!({
            "id": "9be0a3d4-1f11-4d61-8b1a-7f2f3c1d2e4b",
            "name": "Gaming Mouse",
            "description": "Product added via natural language query",
            "price": 49.99,
            "stock": 50,
            "sellerId": "3f6c2c3a-54d2-4f0b-9f36-0a6a6a3c9f10",
            "active": true
        });

        let product: Product = serde_json::from_value(raw.clone()).expect("product should parse");
        assert_eq!(product.name, "Gaming Mouse");
        assert_eq!(product.stock, 50);
        assert!(product.extra.contains_key("sellerId"));

        let back = serde_json::to_value(&product).expect("product should serialize");
        assert_eq!(back, raw);
    }

    #[test]
    fn description_is_optional() {
        let product: Product = serde_json::from_value(json!({
            "id": "p-1",
            "name": "Webcam",
            "price": 20.0,
            "stock": 3
        }))
        .expect("product without description should parse");

        assert!(product.description.is_none());
    }
}
