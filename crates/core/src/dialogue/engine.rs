use thiserror::Error;

use crate::session::Session;

use super::state::{
    CommandDraft, CommandRequest, DialogueState, DialogueStep, ProductDraft, SelectDraft,
    SelectReason, SellerDraft, Slot, SlotQuestion, SlotValue, StockDraft,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DialogueError {
    #[error("no dialogue is in progress to receive an answer")]
    NoPendingDialogue,
}

/// Slot-filling rules for every supported intent: which slot is asked next,
/// in what fixed order, and when a command is complete enough to execute.
/// One slot is requested per turn; the question for an unanswered slot is
/// stable across turns.
#[derive(Clone, Debug, Default)]
pub struct DialogueEngine;

impl DialogueEngine {
    pub fn new() -> Self {
        Self
    }

    /// Open a dialogue for a fresh command. Entity selection pre-empts field
    /// collection: intents that operate on a seller redirect to seller
    /// selection when none is selected, before any of their own slots are
    /// asked. Returns the state to adopt and the step to take.
    pub fn begin(&self, command: CommandDraft, session: &Session) -> (DialogueState, DialogueStep) {
        match command {
            CommandDraft::CreateSeller(draft) => seller_step(draft),
            CommandDraft::AddProduct(draft) => {
                if session.current_seller.is_none() {
                    select_step(SelectDraft::default(), SelectReason::ForAddProduct)
                } else {
                    product_step(draft)
                }
            }
            CommandDraft::UpdateStock(mut draft) => {
                if session.current_seller.is_none() {
                    select_step(SelectDraft::default(), SelectReason::ForUpdateStock)
                } else {
                    if draft.product_name.is_none() {
                        draft.product_name =
                            session.current_product.as_ref().map(|product| product.name.clone());
                    }
                    stock_step(draft)
                }
            }
            CommandDraft::SelectSeller(draft) => select_step(draft, SelectReason::Direct),
            CommandDraft::ListSellers => {
                (DialogueState::Idle, DialogueStep::Execute(CommandRequest::ListSellers))
            }
            CommandDraft::LowStock => {
                if session.current_seller.is_none() {
                    select_step(SelectDraft::default(), SelectReason::ForLowStock)
                } else {
                    (DialogueState::Idle, DialogueStep::Execute(CommandRequest::LowStockReport))
                }
            }
            CommandDraft::CheckHealth => {
                (DialogueState::Idle, DialogueStep::Execute(CommandRequest::CheckHealth))
            }
        }
    }

    /// Apply the user's answer to the one slot the dialogue is waiting on.
    /// An answer of the wrong kind leaves the draft untouched and re-asks
    /// the current question.
    pub fn answer(
        &self,
        state: DialogueState,
        value: SlotValue,
    ) -> Result<(DialogueState, DialogueStep), DialogueError> {
        match state {
            DialogueState::Idle => Err(DialogueError::NoPendingDialogue),
            DialogueState::CreatingSeller(draft) => Ok(fill_seller(draft, value)),
            DialogueState::AddingProduct(draft) => Ok(fill_product(draft, value)),
            DialogueState::UpdatingStock(draft) => Ok(fill_stock(draft, value)),
            DialogueState::SelectingSeller { draft, reason } => {
                Ok(fill_select(draft, reason, value))
            }
        }
    }

    /// The question the dialogue is currently waiting on, if any. Re-derived
    /// from state alone, so asking twice yields the same text.
    pub fn question_for(&self, state: &DialogueState) -> Option<SlotQuestion> {
        let (_, step) = match state.clone() {
            DialogueState::Idle => return None,
            DialogueState::CreatingSeller(draft) => seller_step(draft),
            DialogueState::AddingProduct(draft) => product_step(draft),
            DialogueState::UpdatingStock(draft) => stock_step(draft),
            DialogueState::SelectingSeller { draft, reason } => select_step(draft, reason),
        };

        match step {
            DialogueStep::Ask(question) => Some(question),
            DialogueStep::Execute(_) => None,
        }
    }

    pub fn awaited_slot(&self, state: &DialogueState) -> Option<Slot> {
        self.question_for(state).map(|question| question.slot)
    }
}

fn fill_seller(mut draft: SellerDraft, value: SlotValue) -> (DialogueState, DialogueStep) {
    if draft.name.is_none() {
        if let SlotValue::Text(text) = value {
            draft.name = Some(text);
        }
    } else if draft.email.is_none() {
        if let SlotValue::Email(email) = value {
            draft.email = Some(email);
        }
    }
    seller_step(draft)
}

fn fill_product(mut draft: ProductDraft, value: SlotValue) -> (DialogueState, DialogueStep) {
    if draft.name.is_none() {
        if let SlotValue::Text(text) = value {
            draft.name = Some(text);
        }
    } else if draft.price.is_none() {
        if let SlotValue::Price(price) = value {
            draft.price = Some(price);
        }
    } else if draft.stock.is_none() {
        if let SlotValue::Quantity(stock) = value {
            draft.stock = Some(stock);
        }
    }
    product_step(draft)
}

fn fill_stock(mut draft: StockDraft, value: SlotValue) -> (DialogueState, DialogueStep) {
    if draft.product_name.is_none() {
        if let SlotValue::Text(text) = value {
            draft.product_name = Some(text);
        }
    } else if draft.new_stock.is_none() {
        if let SlotValue::Quantity(new_stock) = value {
            draft.new_stock = Some(new_stock);
        }
    }
    stock_step(draft)
}

fn fill_select(
    mut draft: SelectDraft,
    reason: SelectReason,
    value: SlotValue,
) -> (DialogueState, DialogueStep) {
    if draft.seller_id.is_none() {
        if let SlotValue::SellerRef(seller_id) = value {
            draft.seller_id = Some(seller_id);
        }
    }
    select_step(draft, reason)
}

fn seller_step(draft: SellerDraft) -> (DialogueState, DialogueStep) {
    if let (Some(name), Some(email)) = (&draft.name, &draft.email) {
        let request = CommandRequest::CreateSeller { name: name.clone(), email: email.clone() };
        return (DialogueState::Idle, DialogueStep::Execute(request));
    }

    let question = if draft.name.is_none() {
        SlotQuestion { slot: Slot::SellerName, text: "What is the seller's name?".to_string() }
    } else {
        SlotQuestion {
            slot: Slot::SellerEmail,
            text: "What is the seller's email address?".to_string(),
        }
    };

    (DialogueState::CreatingSeller(draft), DialogueStep::Ask(question))
}

fn product_step(draft: ProductDraft) -> (DialogueState, DialogueStep) {
    if let (Some(name), Some(price), Some(stock)) = (&draft.name, draft.price, draft.stock) {
        let request = CommandRequest::AddProduct { name: name.clone(), price, stock };
        return (DialogueState::Idle, DialogueStep::Execute(request));
    }

    let question = if draft.name.is_none() {
        SlotQuestion {
            slot: Slot::ProductName,
            text: "What is the name of the product?".to_string(),
        }
    } else if draft.price.is_none() {
        SlotQuestion {
            slot: Slot::ProductPrice,
            text: format!("What is the price for {}?", draft.display_name()),
        }
    } else {
        SlotQuestion {
            slot: Slot::ProductStock,
            text: format!("How many units of {} are in stock?", draft.display_name()),
        }
    };

    (DialogueState::AddingProduct(draft), DialogueStep::Ask(question))
}

fn stock_step(draft: StockDraft) -> (DialogueState, DialogueStep) {
    if draft.product_name.is_some() {
        if let Some(new_stock) = draft.new_stock {
            return (
                DialogueState::Idle,
                DialogueStep::Execute(CommandRequest::UpdateStock { new_stock }),
            );
        }
    }

    let question = if draft.product_name.is_none() {
        SlotQuestion {
            slot: Slot::TargetProduct,
            text: "Which product would you like to update? Please provide the product name."
                .to_string(),
        }
    } else {
        SlotQuestion {
            slot: Slot::NewStock,
            text: format!("What is the new stock quantity for {}?", draft.display_name()),
        }
    };

    (DialogueState::UpdatingStock(draft), DialogueStep::Ask(question))
}

fn select_step(draft: SelectDraft, reason: SelectReason) -> (DialogueState, DialogueStep) {
    if let Some(seller_id) = &draft.seller_id {
        let request = CommandRequest::SelectSeller { seller_id: seller_id.clone() };
        return (DialogueState::Idle, DialogueStep::Execute(request));
    }

    let text = match reason {
        SelectReason::Direct => "Which seller would you like to use? Please provide the seller ID.",
        SelectReason::ForAddProduct => {
            "Which seller would you like to add a product for? Please provide the seller ID."
        }
        SelectReason::ForUpdateStock => {
            "Which seller's product would you like to update? Please provide the seller ID."
        }
        SelectReason::ForLowStock => {
            "Which seller would you like to check low stock for? Please provide the seller ID."
        }
    };

    (
        DialogueState::SelectingSeller { draft, reason },
        DialogueStep::Ask(SlotQuestion { slot: Slot::SellerId, text: text.to_string() }),
    )
}
