use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::dialogue::DialogueState;
use crate::domain::product::Product;
use crate::domain::seller::Seller;

/// One executed operation, immutable once appended. History is insertion
/// ordered and never pruned within a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub operation: String,
    pub details: Value,
    pub timestamp: DateTime<Utc>,
}

impl ConversationEntry {
    pub fn new(operation: impl Into<String>, details: Value) -> Self {
        Self { operation: operation.into(), details, timestamp: Utc::now() }
    }
}

/// Per-session state passed explicitly to every operation: executed history,
/// the currently selected entities used for implicit reference, free-form
/// context, and the in-flight dialogue. The dialogue is ephemeral and never
/// persisted; everything else maps one-to-one onto the session file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub conversation_history: Vec<ConversationEntry>,
    #[serde(default)]
    pub current_seller: Option<Seller>,
    #[serde(default)]
    pub current_product: Option<Product>,
    #[serde(default)]
    pub context: Map<String, Value>,
    #[serde(skip)]
    pub dialogue: DialogueState,
}

impl Session {
    pub fn record(&mut self, operation: impl Into<String>, details: Value) {
        self.conversation_history.push(ConversationEntry::new(operation, details));
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("could not read session file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse session file `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("could not serialize session state: {0}")]
    Serialize(serde_json::Error),
    #[error("could not write session file `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

/// Loads and saves a session as a single pretty-printed JSON document. A
/// missing file is an empty session, not an error; a corrupt file is an
/// explicit error the caller decides how to handle.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Session, SessionStoreError> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|source| SessionStoreError::Read { path: self.path.clone(), source })?;
        serde_json::from_str(&raw)
            .map_err(|source| SessionStoreError::Parse { path: self.path.clone(), source })
    }

    /// Write-through save. Writes a sibling temp file first and renames it
    /// into place so a crash mid-write cannot truncate the previous session.
    pub fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let body = serde_json::to_string_pretty(session).map_err(SessionStoreError::Serialize)?;
        let temp_path = self.path.with_extension("tmp");

        fs::write(&temp_path, body)
            .map_err(|source| SessionStoreError::Write { path: temp_path.clone(), source })?;
        fs::rename(&temp_path, &self.path)
            .map_err(|source| SessionStoreError::Write { path: self.path.clone(), source })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};
    use tempfile::TempDir;

    use crate::domain::product::{Product, ProductId};
    use crate::domain::seller::{Seller, SellerId};

    use super::{Session, SessionStore, SessionStoreError};

    fn seller_fixture() -> Seller {
        let mut extra = Map::new();
        extra.insert("active".to_string(), json!(true));
        Seller {
            id: SellerId("3f6c2c3a-54d2-4f0b-9f36-0a6a6a3c9f10".to_string()),
            name: "Tech Store".to_string(),
            email: "tech@store.com".to_string(),
            extra,
        }
    }

    fn product_fixture() -> Product {
        Product {
            id: ProductId("9be0a3d4-1f11-4d61-8b1a-7f2f3c1d2e4b".to_string()),
            name: "Gaming Mouse".to_string(),
            description: Some("Product added via natural language query".to_string()),
            price: 49.99,
            stock: 50,
            extra: Map::new(),
        }
    }

    #[test]
    fn missing_file_loads_an_empty_session() {
        let dir = TempDir::new().expect("temp dir");
        let store = SessionStore::new(dir.path().join("sellery_session.json"));

        let session = store.load().expect("missing file should not be an error");
        assert!(session.conversation_history.is_empty());
        assert!(session.current_seller.is_none());
        assert!(session.current_product.is_none());
        assert!(session.context.is_empty());
    }

    #[test]
    fn round_trip_preserves_history_entities_and_context() {
        let dir = TempDir::new().expect("temp dir");
        let store = SessionStore::new(dir.path().join("sellery_session.json"));

        let mut session = Session::default();
        session.record("create_seller", json!({"request": {"name": "Tech Store"}}));
        session.record("add_product", json!({"seller_id": "s-1", "response": {"stock": 50}}));
        session.record("update_stock", json!({"new_stock": 42}));
        session.current_seller = Some(seller_fixture());
        session.current_product = Some(product_fixture());
        session.context.insert("last_topic".to_string(), json!("inventory"));

        store.save(&session).expect("save should succeed");
        let loaded = store.load().expect("load should succeed");

        assert_eq!(loaded, session);
        assert_eq!(loaded.conversation_history.len(), 3);
        assert_eq!(loaded.conversation_history[0].operation, "create_seller");
        assert_eq!(
            loaded.conversation_history[0].timestamp,
            session.conversation_history[0].timestamp
        );
    }

    #[test]
    fn corrupt_file_surfaces_a_parse_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("sellery_session.json");
        std::fs::write(&path, "{not valid json").expect("write corrupt file");

        let store = SessionStore::new(&path);
        match store.load() {
            Err(SessionStoreError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn save_is_write_through() {
        let dir = TempDir::new().expect("temp dir");
        let store = SessionStore::new(dir.path().join("sellery_session.json"));

        let mut session = Session::default();
        session.record("health_check", json!({"status": {"status": "UP"}}));
        store.save(&session).expect("first save");

        session.record("list_sellers", json!({"response": []}));
        store.save(&session).expect("second save");

        let loaded = store.load().expect("load");
        assert_eq!(loaded.conversation_history.len(), 2);
        assert_eq!(loaded.conversation_history[1].operation, "list_sellers");
    }
}
