//! Conversational layer - keyword intent matching and turn orchestration
//!
//! This crate turns free-text input into marketplace operations:
//! - Matches keywords to one of the supported intents (`intent`)
//! - Extracts slot values from clauses in the wording (`clauses`)
//! - Drives the clarifying-question dialogue held on the session
//! - Executes completed commands against the marketplace (`executor`)
//!
//! # Flow
//!
//! Each line of input passes through a fixed pipeline:
//! 1. **Interpretation** (`intent`) - fresh command, slot answer, or neither
//! 2. **Dialogue** (`sellery-core`) - one question per turn until complete
//! 3. **Execution** (`executor`) - exactly one API call per completed command
//!
//! The interpreter never guesses: input that matches no keyword rule and
//! answers no pending question is reported back as unrecognized, with the
//! list of things the assistant can do.

pub mod assistant;
pub mod clauses;
pub mod executor;
pub mod intent;

pub use assistant::{Assistant, TurnReply};
pub use executor::{ExecutionOutcome, DEFAULT_PRODUCT_DESCRIPTION};
pub use intent::{Interpretation, Interpreter};
