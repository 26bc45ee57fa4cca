use anyhow::bail;
use anyhow::Result;
use ratatui::prelude::Rect;
use serde_json::json;
use tokio::sync::mpsc;

use super::AppState;
use super::Flow;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::PendingQuery;
use crate::domain::models::ResponseFormat;
use crate::domain::services::SessionStore;

fn app_state() -> AppState {
    let mut store = SessionStore::new(ResponseFormat::Chat);
    store.initialize();

    let mut app_state = AppState::new(store);
    app_state.set_rect(Rect::new(0, 0, 80, 20));
    return app_state;
}

fn to_pending(action: Option<Action>) -> Result<PendingQuery> {
    let pending = match action {
        Some(Action::SendQuery(pending)) => pending,
        None => bail!("No action was sent"),
    };

    return Ok(pending);
}

mod submit {
    use super::*;

    #[test]
    fn it_quits() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        assert_eq!(app_state.submit("/q", &tx)?, Flow::Quit);
        assert_eq!(app_state.submit("/exit", &tx)?, Flow::Quit);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_signs_out() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        assert_eq!(app_state.submit("/signout", &tx)?, Flow::SignOut);
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_creates_and_selects_chats() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        assert_eq!(app_state.submit("/new", &tx)?, Flow::Continue);
        assert_eq!(app_state.session.threads().len(), 2);
        assert_eq!(app_state.session.active_index(), Some(1));

        assert_eq!(app_state.submit("/chat 1", &tx)?, Flow::Continue);
        assert_eq!(app_state.session.active_index(), Some(0));
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[test]
    fn it_reports_missing_chats() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.submit("/chat 7", &tx)?;
        assert_eq!(app_state.session.active_index(), Some(0));
        assert_eq!(
            app_state.notice,
            Some("There is no chat 7, there are 1 chats.".to_string())
        );

        app_state.submit("/chat", &tx)?;
        assert!(app_state.notice.unwrap().contains("/chat 2"));

        return Ok(());
    }

    #[test]
    fn it_shows_help() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.submit("/help", &tx)?;
        let transcript = app_state.transcript();
        assert_eq!(transcript[0].author, Author::JustAsk);
        assert_eq!(transcript[0].text, "COMMANDS:");

        return Ok(());
    }

    #[test]
    fn it_sends_questions() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        assert_eq!(app_state.submit("What is revenue?", &tx)?, Flow::Continue);
        let pending = to_pending(rx.try_recv().ok())?;

        assert_eq!(pending.query, "What is revenue?");
        assert_eq!(pending.thread.index(), 0);
        assert_eq!(app_state.in_flight, 1);
        assert!(app_state.session.threads()[0].messages().is_empty());

        return Ok(());
    }
}

mod handle_query_response {
    use super::*;

    #[test]
    fn it_appends_to_the_active_thread() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.submit("What is revenue?", &tx)?;
        let pending = to_pending(rx.try_recv().ok())?;
        app_state.handle_query_response(pending, &json!({ "response": "Revenue is $10M" }))?;

        assert_eq!(app_state.in_flight, 0);
        assert_eq!(
            app_state.session.active_thread().unwrap().messages(),
            &[Message::new("What is revenue?", "Revenue is $10M")]
        );

        let transcript = app_state
            .transcript()
            .into_iter()
            .map(|line| return line.text)
            .collect::<Vec<String>>();
        assert_eq!(
            transcript,
            vec!["You: What is revenue?", "AI: Revenue is $10M", ""]
        );

        return Ok(());
    }

    #[test]
    fn it_sends_to_the_selected_chat() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();
        app_state.new_chat();
        assert_eq!(app_state.session.active_index(), Some(1));

        app_state.select_chat(0);
        app_state.submit("What is revenue?", &tx)?;
        let pending = to_pending(rx.try_recv().ok())?;
        app_state.handle_query_response(pending, &json!({ "response": "Revenue is $10M" }))?;

        assert_eq!(app_state.session.threads()[0].messages().len(), 1);
        assert!(app_state.session.threads()[1].messages().is_empty());

        return Ok(());
    }

    #[test]
    fn it_keeps_responses_in_their_chat_after_switching() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = app_state();

        app_state.submit("first", &tx)?;
        app_state.new_chat();
        app_state.submit("second", &tx)?;
        assert_eq!(app_state.in_flight, 2);

        let first = to_pending(rx.try_recv().ok())?;
        let second = to_pending(rx.try_recv().ok())?;
        app_state.handle_query_response(second, &json!({ "error": "boom" }))?;
        app_state.handle_query_response(first, &json!({}))?;

        assert_eq!(app_state.in_flight, 0);
        assert_eq!(
            app_state.session.threads()[0].messages(),
            &[Message::new("first", "Unexpected response format.")]
        );
        assert_eq!(
            app_state.session.threads()[1].messages(),
            &[Message::new(
                "second",
                "Error storing query. Check console for details."
            )]
        );

        return Ok(());
    }
}

mod navigation {
    use super::*;

    #[test]
    fn it_shows_empty_chats() {
        let app_state = app_state();
        let transcript = app_state.transcript();

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].text, "No messages yet");
    }

    #[test]
    fn it_moves_between_chats() {
        let mut app_state = app_state();
        app_state.new_chat();
        app_state.new_chat();
        assert_eq!(app_state.session.active_index(), Some(2));

        app_state.select_next();
        assert_eq!(app_state.session.active_index(), Some(2));

        app_state.select_previous();
        app_state.select_previous();
        app_state.select_previous();
        assert_eq!(app_state.session.active_index(), Some(0));

        app_state.select_next();
        assert_eq!(app_state.session.active_index(), Some(1));
        assert_eq!(app_state.notice, None);
    }
}
