#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use serde_json::Value;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::Scroll;
use super::SessionStore;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::Author;
use crate::domain::models::PendingQuery;
use crate::domain::models::SlashCommand;
use crate::domain::models::TranscriptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    SignOut,
}

pub struct AppState {
    pub session: SessionStore,
    pub in_flight: usize,
    pub notice: Option<String>,
    pub scroll: Scroll,
    pub last_known_height: u16,
    pub last_known_width: u16,
}

impl AppState {
    pub fn new(session: SessionStore) -> AppState {
        return AppState {
            session,
            in_flight: 0,
            notice: None,
            scroll: Scroll::default(),
            last_known_height: 0,
            last_known_width: 0,
        };
    }

    /// Warns in the chat pane when the API is down. Chatting stays possible.
    pub async fn check_backend(&mut self, api: &ApiBox) {
        if let Err(err) = api.health_check().await {
            self.notice = Some(format!("Hey, it looks like the Just Ask AI API isn't reachable. Your questions will come back with errors until it's running again.\n\nError: {err}"));
            self.sync_dependants();
        }
    }

    pub fn transcript(&self) -> Vec<TranscriptLine> {
        let width = self.last_known_width as usize;
        let mut lines = vec![];

        if let Some(notice) = &self.notice {
            for text in notice.split('\n') {
                lines.push(TranscriptLine {
                    author: Author::JustAsk,
                    text: text.to_string(),
                });
            }
            lines.push(TranscriptLine {
                author: Author::JustAsk,
                text: "".to_string(),
            });
        }

        let messages = match self.session.active_thread() {
            Some(thread) => thread.messages(),
            None => &[],
        };

        if messages.is_empty() {
            lines.push(TranscriptLine {
                author: Author::JustAsk,
                text: "No messages yet".to_string(),
            });
            return lines;
        }

        for message in messages {
            lines.extend(message.as_transcript(width));
            lines.push(TranscriptLine {
                author: Author::JustAsk,
                text: "".to_string(),
            });
        }

        return lines;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// Handles one line of user input: slash commands act on the session,
    /// anything else is sent to the API as a question.
    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<Flow> {
        self.notice = None;

        if let Some(command) = SlashCommand::parse(input) {
            if command.is_quit() {
                return Ok(Flow::Quit);
            }

            if command.is_sign_out() {
                return Ok(Flow::SignOut);
            }

            if command.is_new_chat() {
                self.new_chat();
            } else if command.is_select_chat() {
                match command.chat_index() {
                    Some(index) => self.select_chat(index),
                    None => {
                        self.notice =
                            Some("You must pass a chat number with `/chat`, for example `/chat 2`.".to_string());
                    }
                }
            } else if command.is_help() {
                self.notice = Some(help_text());
            }

            self.sync_dependants();
            return Ok(Flow::Continue);
        }

        let pending = self.session.send_message(input);
        tracing::debug!(
            thread = pending.thread.index(),
            query = pending.query.as_str(),
            "Sending query"
        );
        tx.send(Action::SendQuery(pending))?;
        self.in_flight += 1;

        self.sync_dependants();
        return Ok(Flow::Continue);
    }

    pub fn handle_query_response(&mut self, pending: PendingQuery, payload: &Value) -> Result<()> {
        self.in_flight = self.in_flight.saturating_sub(1);

        let thread = pending.thread;
        self.session.complete_message(pending, payload)?;
        self.sync_dependants();

        if self.session.active_index() == Some(thread.index()) {
            self.scroll.last();
        }

        return Ok(());
    }

    pub fn new_chat(&mut self) {
        self.session.new_chat();
        self.scroll.position = 0;
        self.sync_dependants();
    }

    pub fn select_chat(&mut self, index: usize) {
        if let Err(err) = self.session.select_chat(index) {
            self.notice = Some(err.to_string());
            self.sync_dependants();
            return;
        }

        self.sync_dependants();
        self.scroll.last();
    }

    pub fn select_previous(&mut self) {
        if let Some(index) = self.session.active_index() {
            if index > 0 {
                self.select_chat(index - 1);
            }
        }
    }

    pub fn select_next(&mut self) {
        let next = match self.session.active_index() {
            Some(index) => index + 1,
            None => 0,
        };
        if next < self.session.threads().len() {
            self.select_chat(next);
        }
    }

    fn sync_dependants(&mut self) {
        self.scroll
            .set_state(self.transcript().len() as u16, self.last_known_height);
    }
}
