#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_json::Value;

use crate::domain::models::ChatThread;
use crate::domain::models::Message;
use crate::domain::models::PendingQuery;
use crate::domain::models::ResponseFormat;
use crate::domain::models::Session;
use crate::domain::models::ThreadId;

/// Owns the chat threads for a signed in user and applies every change to
/// them. Responses are interpreted with the configured `ResponseFormat`.
pub struct SessionStore {
    session: Session,
    format: ResponseFormat,
}

impl SessionStore {
    pub fn new(format: ResponseFormat) -> SessionStore {
        return SessionStore {
            session: Session::default(),
            format,
        };
    }

    pub fn format(&self) -> ResponseFormat {
        return self.format;
    }

    /// Creates the first thread. Does nothing if any thread exists.
    pub fn initialize(&mut self) {
        if self.session.threads.is_empty() {
            self.new_chat();
        }
    }

    pub fn new_chat(&mut self) -> ThreadId {
        let id = ThreadId::new(self.session.threads.len());
        let title = format!("Chat {}", id.index() + 1);
        self.session.threads.push(ChatThread::new(&title));
        self.session.active = Some(id);

        tracing::debug!(title = title, "New chat");
        return id;
    }

    /// Fails without changing the active thread when `index` does not name a
    /// thread.
    pub fn select_chat(&mut self, index: usize) -> Result<()> {
        if index >= self.session.threads.len() {
            bail!(format!(
                "There is no chat {}, there are {} chats.",
                index + 1,
                self.session.threads.len()
            ));
        }

        self.session.active = Some(ThreadId::new(index));
        return Ok(());
    }

    /// Resolves the thread a question belongs to, creating one if nothing is
    /// active. The returned query must be completed with `complete_message`
    /// once the backend answers.
    pub fn send_message(&mut self, query: &str) -> PendingQuery {
        let thread = match self.session.active {
            Some(id) => id,
            None => self.new_chat(),
        };
        let position = self.session.threads[thread.index()].next_position();

        return PendingQuery {
            thread,
            position,
            query: query.to_string(),
        };
    }

    /// Adds the question and its derived response to the thread captured when
    /// it was sent, regardless of which thread is active now. Messages keep
    /// send order within the thread.
    pub fn complete_message(&mut self, pending: PendingQuery, payload: &Value) -> Result<()> {
        let response = self.format.response_text(payload);
        let thread = match self.session.threads.get_mut(pending.thread.index()) {
            Some(thread) => thread,
            None => bail!(format!(
                "Response arrived for unknown chat {}",
                pending.thread.index() + 1
            )),
        };

        thread.insert(pending.position, Message::new(&pending.query, &response));
        return Ok(());
    }

    pub fn threads(&self) -> &[ChatThread] {
        return &self.session.threads;
    }

    pub fn active_index(&self) -> Option<usize> {
        return self.session.active.map(|id| return id.index());
    }

    pub fn active_thread(&self) -> Option<&ChatThread> {
        let id = self.session.active?;
        return self.session.threads.get(id.index());
    }
}
