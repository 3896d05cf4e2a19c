pub mod config;
pub mod dialogue;
pub mod domain;
pub mod errors;
pub mod marketplace;
pub mod session;

pub use config::{
    ApiConfig, AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig,
    SessionConfig,
};
pub use dialogue::{
    CommandDraft, CommandRequest, DialogueEngine, DialogueError, DialogueState, DialogueStep,
    ProductDraft, SelectDraft, SelectReason, SellerDraft, Slot, SlotQuestion, SlotValue, StockDraft,
};
pub use domain::product::{Product, ProductId};
pub use domain::seller::{Seller, SellerId};
pub use errors::{ApiError, ClientError};
pub use marketplace::{HealthStatus, MarketplaceApi, NewProduct, NewSeller, StockUpdate};
pub use session::{ConversationEntry, Session, SessionStore, SessionStoreError};
