use std::io::{self, BufRead, Write};

use tracing::warn;

use sellery_agent::{Assistant, TurnReply};
use sellery_api::HttpMarketplace;
use sellery_core::config::AppConfig;
use sellery_core::session::{Session, SessionStore};

use crate::commands::{history, CommandResult};

const HELP: &str = "Things you can say:\n\
  - Create a seller\n\
  - Add product name is Gaming Mouse, price is 49.99, stock is 50\n\
  - Update stock of product Gaming Mouse to 75\n\
  - Select seller <id>\n\
  - list sellers\n\
  - Show products with low stock\n\
  - check the server health\n\
Chat commands: help, history, context, exit";

pub fn run(config: &AppConfig) -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "chat",
                "runtime",
                format!("failed to initialize async runtime: {error}"),
                3,
            )
        }
    };

    let api = match HttpMarketplace::new(&config.api) {
        Ok(api) => api,
        Err(error) => return CommandResult::failure("chat", "api_client", error.to_string(), 3),
    };
    let assistant = Assistant::new(api);

    let store = SessionStore::new(&config.session.file);
    let mut session = match store.load() {
        Ok(session) => session,
        Err(error) => {
            warn!(%error, "session file could not be loaded, starting fresh");
            Session::default()
        }
    };

    println!("Sellery - talking to {}", config.api.base_url);
    println!("Type 'help' for examples, 'history' for past operations, 'exit' to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                warn!(%error, "could not read input");
                break;
            }
            None => break,
        };

        let input = line.trim();
        match input {
            "" => continue,
            "exit" | "quit" => break,
            "help" => println!("{HELP}"),
            "history" => println!("{}", history::render(&session, None)),
            "context" => println!("{}", render_context(&session)),
            _ => match runtime.block_on(assistant.process_turn(&mut session, input)) {
                Ok(TurnReply::Question(text)) => println!("{text}"),
                Ok(TurnReply::Completed { summary, .. }) => {
                    println!("{summary}");
                    persist(&store, &session);
                }
                Ok(TurnReply::Unrecognized { message }) => println!("{message}"),
                Err(error) => println!("Error: {error}"),
            },
        }
    }

    persist(&store, &session);
    CommandResult { exit_code: 0, output: "Goodbye!".to_string() }
}

fn persist(store: &SessionStore, session: &Session) {
    if let Err(error) = store.save(session) {
        println!("Warning: could not save the session: {error}");
    }
}

fn render_context(session: &Session) -> String {
    let seller = session
        .current_seller
        .as_ref()
        .map(|seller| format!("{} (ID: {})", seller.name, seller.id.0))
        .unwrap_or_else(|| "none".to_string());
    let product = session
        .current_product
        .as_ref()
        .map(|product| format!("{} (ID: {})", product.name, product.id.0))
        .unwrap_or_else(|| "none".to_string());

    format!("Current seller: {seller}\nCurrent product: {product}")
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use sellery_core::domain::seller::{Seller, SellerId};
    use sellery_core::session::Session;

    use super::render_context;

    #[test]
    fn context_shows_selected_entities_or_none() {
        let mut session = Session::default();
        assert_eq!(render_context(&session), "Current seller: none\nCurrent product: none");

        session.current_seller = Some(Seller {
            id: SellerId("seller-1".to_string()),
            name: "Tech Store".to_string(),
            email: "tech@store.com".to_string(),
            extra: Map::new(),
        });
        assert_eq!(
            render_context(&session),
            "Current seller: Tech Store (ID: seller-1)\nCurrent product: none"
        );
    }
}
