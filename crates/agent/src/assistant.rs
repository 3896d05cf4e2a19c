use serde_json::Value;
use tracing::debug;

use sellery_core::dialogue::{DialogueEngine, DialogueError, DialogueState, DialogueStep};
use sellery_core::errors::ClientError;
use sellery_core::marketplace::MarketplaceApi;
use sellery_core::session::Session;

use crate::executor::{self, ExecutionOutcome};
use crate::intent::{Interpretation, Interpreter};

const CAPABILITIES: &str = "I can help you create a seller, add a product, update stock, \
     select a seller, list sellers, check low stock, or check the server health. \
     What would you like to do?";

/// What the assistant says back after one turn of input.
#[derive(Clone, Debug, PartialEq)]
pub enum TurnReply {
    /// One more slot is needed before the command can run.
    Question(String),
    /// A command ran against the marketplace.
    Completed { summary: String, details: Value },
    /// The input matched neither a command nor the pending question.
    Unrecognized { message: String },
}

/// Drives one conversation: interprets each line, advances the in-flight
/// dialogue held on the session, and executes completed commands against
/// the marketplace.
pub struct Assistant<A> {
    api: A,
    engine: DialogueEngine,
    interpreter: Interpreter,
}

impl<A: MarketplaceApi> Assistant<A> {
    pub fn new(api: A) -> Self {
        Self { api, engine: DialogueEngine::new(), interpreter: Interpreter::new() }
    }

    /// Process one line of input, mutating the session's dialogue, selected
    /// entities, and history as the turn requires. Errors are conversational
    /// and safe to print; after an error the dialogue is idle.
    pub async fn process_turn(
        &self,
        session: &mut Session,
        input: &str,
    ) -> Result<TurnReply, ClientError> {
        let text = input.trim();
        let awaiting = self.engine.awaited_slot(&session.dialogue);
        debug!(input = %text, awaiting = ?awaiting, "processing turn");

        match self.interpreter.interpret(text, awaiting) {
            Interpretation::Command(command) => {
                // A fresh command replaces whatever dialogue was pending.
                let (state, step) = self.engine.begin(command, session);
                self.advance(session, state, step).await
            }
            Interpretation::SlotAnswer(value) => {
                let state = std::mem::take(&mut session.dialogue);
                match self.engine.answer(state, value) {
                    Ok((state, step)) => self.advance(session, state, step).await,
                    Err(DialogueError::NoPendingDialogue) => Ok(self.unrecognized()),
                }
            }
            Interpretation::InvalidSlotAnswer(slot) => {
                let prompt = slot.invalid_answer_prompt().map(str::to_string).or_else(|| {
                    self.engine.question_for(&session.dialogue).map(|question| question.text)
                });
                Ok(match prompt {
                    Some(text) => TurnReply::Question(text),
                    None => self.unrecognized(),
                })
            }
            Interpretation::Unknown => Ok(self.unrecognized()),
        }
    }

    async fn advance(
        &self,
        session: &mut Session,
        state: DialogueState,
        step: DialogueStep,
    ) -> Result<TurnReply, ClientError> {
        // Execute always pairs with an idle state, so a failed call leaves
        // no half-finished dialogue behind.
        session.dialogue = state;

        match step {
            DialogueStep::Ask(question) => Ok(TurnReply::Question(question.text)),
            DialogueStep::Execute(request) => {
                let ExecutionOutcome { summary, details } =
                    executor::execute(&self.api, session, request).await?;
                Ok(TurnReply::Completed { summary, details })
            }
        }
    }

    fn unrecognized(&self) -> TurnReply {
        TurnReply::Unrecognized { message: CAPABILITIES.to_string() }
    }
}
