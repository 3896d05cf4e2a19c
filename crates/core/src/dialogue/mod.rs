//! Multi-turn slot-filling dialogue.
//!
//! A dialogue is opened from a partially-specified command, asks for one
//! missing slot per turn in a fixed order, and yields an executable request
//! once every required slot is filled. The state lives on the session for
//! the duration of the conversation and is never persisted to disk.

pub mod engine;
pub mod state;

pub use engine::{DialogueEngine, DialogueError};
pub use state::{
    CommandDraft, CommandRequest, DialogueState, DialogueStep, ProductDraft, SelectDraft,
    SelectReason, SellerDraft, Slot, SlotQuestion, SlotValue, StockDraft,
};
