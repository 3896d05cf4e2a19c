use sellery_core::dialogue::{
    CommandDraft, ProductDraft, SelectDraft, SellerDraft, Slot, SlotValue, StockDraft,
};
use sellery_core::domain::seller::SellerId;

use crate::clauses;

/// What a single line of input means, given the slot (if any) the dialogue
/// is currently waiting on.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpretation {
    /// A fresh command. Recognizing one always wins over answering a
    /// pending question, so users can abandon a dialogue mid-flight.
    Command(CommandDraft),
    /// A usable answer for the awaited slot.
    SlotAnswer(SlotValue),
    /// Input meant for the awaited slot that failed its validation rule.
    InvalidSlotAnswer(Slot),
    /// Neither a command nor an answer to anything.
    Unknown,
}

#[derive(Clone, Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    pub fn interpret(&self, text: &str, awaiting: Option<Slot>) -> Interpretation {
        if let Some(command) = match_command(text) {
            return Interpretation::Command(command);
        }
        if let Some(slot) = awaiting {
            return answer_for_slot(text, slot);
        }
        Interpretation::Unknown
    }
}

/// Keyword matching over fixed word pairs. Checked most-specific first:
/// "add a product for seller 3" must land on the product intent even though
/// it also mentions a seller.
fn match_command(text: &str) -> Option<CommandDraft> {
    let words = clauses::words(text);
    let has = |keyword: &str| words.iter().any(|word| word == keyword);

    let mentions_seller = has("seller") || has("sellers");
    let mentions_product = has("product") || has("products");

    if (has("add") || has("create")) && mentions_product {
        return Some(CommandDraft::AddProduct(ProductDraft {
            name: clauses::phrase_after(text, &["name", "is"]),
            price: clauses::price_after(text, &["price", "is"]),
            stock: clauses::integer_after(text, &["stock", "is"]),
        }));
    }

    if (has("add") || has("create")) && mentions_seller {
        return Some(CommandDraft::CreateSeller(SellerDraft {
            name: clauses::phrase_after(text, &["name", "is"]),
            email: clauses::email_token(text),
        }));
    }

    if has("low") && has("stock") {
        return Some(CommandDraft::LowStock);
    }

    if (has("update") || has("change")) && has("stock") {
        let new_stock = clauses::integer_after(text, &["to"]);
        let product_name = clauses::phrase_after(text, &["product"])
            .map(|span| strip_stock_tail(&span, new_stock))
            .filter(|name| !name.is_empty());
        return Some(CommandDraft::UpdateStock(StockDraft { product_name, new_stock }));
    }

    if (has("select") || has("use") || has("switch")) && mentions_seller {
        return Some(CommandDraft::SelectSeller(SelectDraft {
            seller_id: clauses::identifier_after(text, &["seller", "id"]).map(SellerId),
        }));
    }

    if (has("list") || has("show") || has("all")) && has("sellers") {
        return Some(CommandDraft::ListSellers);
    }

    if has("health") || (has("server") && has("status")) {
        return Some(CommandDraft::CheckHealth);
    }

    None
}

/// The product-name span swallows a trailing "to <n>" when the new stock
/// level sits inside the same clause; cut it back off.
fn strip_stock_tail(span: &str, new_stock: Option<u32>) -> String {
    let Some(new_stock) = new_stock else {
        return span.to_string();
    };

    let tail = format!("to {new_stock}");
    match span.to_ascii_lowercase().strip_suffix(&tail) {
        Some(kept) => span[..kept.len()].trim_end().to_string(),
        None => span.to_string(),
    }
}

fn answer_for_slot(text: &str, slot: Slot) -> Interpretation {
    let value = match slot {
        Slot::SellerName => clauses::answer_text(text, "name").map(SlotValue::Text),
        Slot::ProductName => clauses::answer_text(text, "name").map(SlotValue::Text),
        Slot::TargetProduct => clauses::answer_text(text, "product")
            .and_then(|answer| clauses::answer_text(&answer, "name"))
            .map(SlotValue::Text),
        Slot::SellerEmail => clauses::email_token(text).map(SlotValue::Email),
        Slot::ProductPrice => clauses::price_token(text).map(SlotValue::Price),
        Slot::ProductStock | Slot::NewStock => clauses::integer_token(text).map(SlotValue::Quantity),
        Slot::SellerId => clauses::identifier_after(text, &["seller", "id"])
            .or_else(|| clauses::bare_identifier(text))
            .map(|id| SlotValue::SellerRef(SellerId(id))),
    };

    match value {
        Some(value) => Interpretation::SlotAnswer(value),
        None => Interpretation::InvalidSlotAnswer(slot),
    }
}

#[cfg(test)]
mod tests {
    use sellery_core::dialogue::{CommandDraft, Slot, SlotValue};
    use sellery_core::domain::seller::SellerId;

    use super::{Interpretation, Interpreter};

    #[test]
    fn keyword_text_resolves_to_the_matching_intent() {
        struct Case {
            text: &'static str,
            expected: fn(&CommandDraft) -> bool,
        }

        let cases = vec![
            Case {
                text: "Create a seller",
                expected: |draft| matches!(draft, CommandDraft::CreateSeller(_)),
            },
            Case {
                text: "add seller please",
                expected: |draft| matches!(draft, CommandDraft::CreateSeller(_)),
            },
            Case {
                text: "Add a product",
                expected: |draft| matches!(draft, CommandDraft::AddProduct(_)),
            },
            Case {
                text: "create product now",
                expected: |draft| matches!(draft, CommandDraft::AddProduct(_)),
            },
            Case {
                text: "Add a product for seller 3",
                expected: |draft| matches!(draft, CommandDraft::AddProduct(_)),
            },
            Case {
                text: "Update stock of product Gaming Mouse to 75",
                expected: |draft| matches!(draft, CommandDraft::UpdateStock(_)),
            },
            Case {
                text: "change stock please",
                expected: |draft| matches!(draft, CommandDraft::UpdateStock(_)),
            },
            Case {
                text: "Select seller seller-1",
                expected: |draft| matches!(draft, CommandDraft::SelectSeller(_)),
            },
            Case {
                text: "use seller 3",
                expected: |draft| matches!(draft, CommandDraft::SelectSeller(_)),
            },
            Case {
                text: "Show all sellers",
                expected: |draft| matches!(draft, CommandDraft::ListSellers),
            },
            Case { text: "list sellers", expected: |draft| matches!(draft, CommandDraft::ListSellers) },
            Case {
                text: "Show products with low stock",
                expected: |draft| matches!(draft, CommandDraft::LowStock),
            },
            Case {
                text: "check the server health",
                expected: |draft| matches!(draft, CommandDraft::CheckHealth),
            },
        ];

        let interpreter = Interpreter::new();
        for (index, case) in cases.iter().enumerate() {
            match interpreter.interpret(case.text, None) {
                Interpretation::Command(draft) => {
                    assert!((case.expected)(&draft), "case {index} misrouted: {}", case.text);
                }
                other => panic!("case {index} expected a command for {:?}, got {other:?}", case.text),
            }
        }
    }

    #[test]
    fn unmatched_text_without_a_pending_slot_is_unknown() {
        let interpreter = Interpreter::new();
        assert_eq!(interpreter.interpret("What's the weather like?", None), Interpretation::Unknown);
        assert_eq!(interpreter.interpret("", None), Interpretation::Unknown);
    }

    #[test]
    fn fresh_commands_carry_inline_slot_values() {
        let interpreter = Interpreter::new();

        let draft = match interpreter.interpret(
            "Add product name is Gaming Mouse, price is 49.99, stock is 50",
            None,
        ) {
            Interpretation::Command(CommandDraft::AddProduct(draft)) => draft,
            other => panic!("expected add_product, got {other:?}"),
        };
        assert_eq!(draft.name.as_deref(), Some("Gaming Mouse"));
        assert_eq!(draft.price, Some(49.99));
        assert_eq!(draft.stock, Some(50));

        let draft = match interpreter
            .interpret("Create seller name is John Doe, email is john.doe@example.com", None)
        {
            Interpretation::Command(CommandDraft::CreateSeller(draft)) => draft,
            other => panic!("expected create_seller, got {other:?}"),
        };
        assert_eq!(draft.name.as_deref(), Some("John Doe"));
        assert_eq!(draft.email.as_deref(), Some("john.doe@example.com"));
    }

    #[test]
    fn update_stock_clause_does_not_swallow_the_target_quantity() {
        let interpreter = Interpreter::new();

        let draft = match interpreter.interpret("Update stock of product Gaming Mouse to 75", None) {
            Interpretation::Command(CommandDraft::UpdateStock(draft)) => draft,
            other => panic!("expected update_stock, got {other:?}"),
        };

        assert_eq!(draft.product_name.as_deref(), Some("Gaming Mouse"));
        assert_eq!(draft.new_stock, Some(75));
    }

    #[test]
    fn pending_slots_read_answers_with_their_own_rule() {
        let interpreter = Interpreter::new();

        assert_eq!(
            interpreter.interpret("The name is John Doe", Some(Slot::SellerName)),
            Interpretation::SlotAnswer(SlotValue::Text("John Doe".to_string()))
        );
        assert_eq!(
            interpreter.interpret("The email is john.doe@example.com", Some(Slot::SellerEmail)),
            Interpretation::SlotAnswer(SlotValue::Email("john.doe@example.com".to_string()))
        );
        assert_eq!(
            interpreter.interpret("The price is 49.99", Some(Slot::ProductPrice)),
            Interpretation::SlotAnswer(SlotValue::Price(49.99))
        );
        assert_eq!(
            interpreter.interpret("The stock is 50", Some(Slot::ProductStock)),
            Interpretation::SlotAnswer(SlotValue::Quantity(50))
        );
        assert_eq!(
            interpreter.interpret("seller-1", Some(Slot::SellerId)),
            Interpretation::SlotAnswer(SlotValue::SellerRef(SellerId("seller-1".to_string())))
        );
    }

    #[test]
    fn malformed_answers_are_flagged_for_a_re_prompt() {
        let interpreter = Interpreter::new();

        assert_eq!(
            interpreter.interpret("The price is abc", Some(Slot::ProductPrice)),
            Interpretation::InvalidSlotAnswer(Slot::ProductPrice)
        );
        assert_eq!(
            interpreter.interpret("lots", Some(Slot::NewStock)),
            Interpretation::InvalidSlotAnswer(Slot::NewStock)
        );
        assert_eq!(
            interpreter.interpret("not an address", Some(Slot::SellerEmail)),
            Interpretation::InvalidSlotAnswer(Slot::SellerEmail)
        );
    }

    #[test]
    fn a_new_command_pre_empts_a_pending_answer() {
        let interpreter = Interpreter::new();

        let interpretation = interpreter.interpret("Create a seller", Some(Slot::ProductPrice));
        assert!(matches!(
            interpretation,
            Interpretation::Command(CommandDraft::CreateSeller(_))
        ));
    }
}
