#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::models::failed_query_payload;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::Event;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - Starts a new chat and makes it active.
- /chat (/c) [CHAT_NUMBER] - Switches to a chat from the Chat History list.
- /signout (/logout) - Forgets your sign in token and returns to the login prompt.
- /quit /exit (/q) - Exit Just Ask AI.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+N - New chat
- CTRL+Up / CTRL+Down - Previous / next chat
- CTRL+O - Sign out
- CTRL+C - Exit Just Ask AI.
        "#;

    return text.trim().to_string();
}

/// Asks the API a question, substituting the fixed error payload when the
/// request fails for any reason.
pub async fn fetch_payload(api: &ApiBox, question: &str) -> Value {
    match api.query(question).await {
        Ok(payload) => return payload,
        Err(err) => {
            tracing::error!(error = ?err, "Query request failed");
            return failed_query_payload();
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs until the action channel closes. Every query gets its own task, so
    /// any number of questions may be in flight at once.
    pub async fn start(
        api: ApiBox,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let api = Arc::new(api);

        while let Some(action) = rx.recv().await {
            match action {
                Action::SendQuery(pending) => {
                    let worker_api = api.clone();
                    let worker_tx = tx.clone();
                    tokio::spawn(async move {
                        let payload = fetch_payload(&worker_api, &pending.query).await;
                        // The UI may already be gone after a sign out.
                        if worker_tx
                            .send(Event::QueryResponse(pending, payload))
                            .is_err()
                        {
                            tracing::debug!("Dropped query response, UI has exited");
                        }
                    });
                }
            }
        }

        return Ok(());
    }
}
