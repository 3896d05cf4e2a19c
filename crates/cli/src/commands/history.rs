use sellery_core::config::AppConfig;
use sellery_core::session::{Session, SessionStore};

use crate::commands::CommandResult;

pub fn run(config: &AppConfig, limit: Option<usize>, json: bool) -> CommandResult {
    let store = SessionStore::new(&config.session.file);
    match store.load() {
        Ok(session) if json => match render_json(&session, limit) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => CommandResult::failure("history", "serialize", error.to_string(), 4),
        },
        Ok(session) => CommandResult { exit_code: 0, output: render(&session, limit) },
        Err(error) => CommandResult::failure("history", "session_file", error.to_string(), 4),
    }
}

/// The raw entries, most recent last, as a JSON array.
fn render_json(session: &Session, limit: Option<usize>) -> Result<String, serde_json::Error> {
    let total = session.conversation_history.len();
    let skip = limit.map(|limit| total.saturating_sub(limit)).unwrap_or(0);
    serde_json::to_string_pretty(&session.conversation_history[skip..])
}

/// Also backs the `history` command inside the chat loop. Entries keep
/// their absolute position so a limited view still reads correctly.
pub(crate) fn render(session: &Session, limit: Option<usize>) -> String {
    if session.conversation_history.is_empty() {
        return "No operations recorded yet.".to_string();
    }

    let total = session.conversation_history.len();
    let skip = limit.map(|limit| total.saturating_sub(limit)).unwrap_or(0);

    let mut lines = vec![format!("{total} operation(s) recorded:")];
    for (index, entry) in session.conversation_history.iter().enumerate().skip(skip) {
        lines.push(format!(
            "{:>3}. {} at {}",
            index + 1,
            entry.operation,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    lines.join("\n")
}
