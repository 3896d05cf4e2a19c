use crate::domain::seller::SellerId;

/// Partially collected slots for `create_seller`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SellerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Partially collected slots for `add_product`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

impl ProductDraft {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("the product")
    }
}

/// Partially collected slots for `update_stock`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StockDraft {
    pub product_name: Option<String>,
    pub new_stock: Option<u32>,
}

impl StockDraft {
    pub fn display_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or("the product")
    }
}

/// Slots for `select_seller`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectDraft {
    pub seller_id: Option<SellerId>,
}

/// Why seller selection is being asked for. Intents that need a seller
/// redirect here, and the wording of the seller-id question tells the user
/// which request triggered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectReason {
    Direct,
    ForAddProduct,
    ForUpdateStock,
    ForLowStock,
}

/// The single dialogue-state representation: one variant per in-progress
/// intent, each carrying only that intent's slots. At most one non-idle
/// dialogue exists per session, and it is never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DialogueState {
    #[default]
    Idle,
    CreatingSeller(SellerDraft),
    AddingProduct(ProductDraft),
    UpdatingStock(StockDraft),
    SelectingSeller { draft: SelectDraft, reason: SelectReason },
}

impl DialogueState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// The one slot a non-idle dialogue is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    SellerName,
    SellerEmail,
    ProductName,
    ProductPrice,
    ProductStock,
    TargetProduct,
    NewStock,
    SellerId,
}

impl Slot {
    /// Re-prompt used when an answer failed to parse for this slot.
    /// Free-text slots accept anything, so they have no re-prompt.
    pub fn invalid_answer_prompt(self) -> Option<&'static str> {
        match self {
            Self::ProductPrice => Some("Please provide a valid price (e.g., 49.99)"),
            Self::ProductStock | Self::NewStock => {
                Some("Please provide a valid stock quantity (whole number)")
            }
            Self::SellerEmail => {
                Some("Please provide a valid email address (e.g., name@example.com)")
            }
            Self::SellerId => Some("Please provide a valid seller ID."),
            Self::SellerName | Self::ProductName | Self::TargetProduct => None,
        }
    }
}

/// A typed answer for a single awaited slot.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotValue {
    Text(String),
    Price(f64),
    Quantity(u32),
    Email(String),
    SellerRef(SellerId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotQuestion {
    pub slot: Slot,
    pub text: String,
}

/// A fresh command as understood from free text: the intent plus whatever
/// slot values the wording already supplied. Absent slots are filled over
/// the following turns.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandDraft {
    CreateSeller(SellerDraft),
    AddProduct(ProductDraft),
    UpdateStock(StockDraft),
    SelectSeller(SelectDraft),
    ListSellers,
    LowStock,
    CheckHealth,
}

/// A fully specified command, ready for exactly one API call. Entity
/// targets (the selected seller and product) are resolved from the session
/// at execution time.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandRequest {
    CreateSeller { name: String, email: String },
    AddProduct { name: String, price: f64, stock: u32 },
    UpdateStock { new_stock: u32 },
    SelectSeller { seller_id: SellerId },
    ListSellers,
    LowStockReport,
    CheckHealth,
}

/// What the dialogue asks of the caller once a turn's input has been
/// applied: put one question to the user, or run one command.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogueStep {
    Ask(SlotQuestion),
    Execute(CommandRequest),
}
