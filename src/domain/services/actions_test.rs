use anyhow::bail;
use anyhow::Result;
use serde_json::json;
use serde_json::Value;
use tokio::sync::mpsc;

use super::fetch_payload;
use super::help_text;
use super::ActionsService;
use crate::domain::models::Action;
use crate::domain::models::ApiBox;
use crate::domain::models::Event;
use crate::domain::models::PendingQuery;
use crate::domain::models::ThreadId;
use crate::infrastructure::api::JustAskApi;

fn to_res(event: Option<Event>) -> Result<(PendingQuery, Value)> {
    let res = match event {
        Some(Event::QueryResponse(pending, payload)) => (pending, payload),
        _ => bail!("Wrong type from recv"),
    };

    return Ok(res);
}

#[test]
fn it_lists_commands_in_help() {
    let text = help_text();
    assert!(text.starts_with("COMMANDS:"));
    assert!(text.contains("/signout"));
    assert!(text.contains("CTRL+N - New chat"));
}

#[tokio::test]
async fn it_substitutes_an_error_payload_when_the_query_fails() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(500)
        .create_async()
        .await;

    let api: ApiBox = Box::new(JustAskApi::new(&server.url(), "200"));
    let payload = fetch_payload(&api, "What is revenue?").await;
    mock.assert_async().await;

    assert_eq!(payload, json!({ "error": "Error storing query." }));
}

#[tokio::test]
async fn it_substitutes_an_error_payload_when_unreachable() {
    let api: ApiBox = Box::new(JustAskApi::new("http://127.0.0.1:1", "200"));
    let payload = fetch_payload(&api, "What is revenue?").await;

    assert_eq!(payload, json!({ "error": "Error storing query." }));
}

#[tokio::test]
async fn it_reports_responses_with_their_thread() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(200)
        .with_body(r#"{"response":"Revenue is $10M"}"#)
        .expect(2)
        .create_async()
        .await;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let api: ApiBox = Box::new(JustAskApi::new(&server.url(), "200"));
    let service = tokio::spawn(async move {
        return ActionsService::start(api, event_tx, &mut action_rx).await;
    });

    action_tx.send(Action::SendQuery(PendingQuery {
        thread: ThreadId::new(0),
        position: 0,
        query: "first".to_string(),
    }))?;
    action_tx.send(Action::SendQuery(PendingQuery {
        thread: ThreadId::new(3),
        position: 0,
        query: "second".to_string(),
    }))?;

    let mut responses = vec![
        to_res(event_rx.recv().await)?,
        to_res(event_rx.recv().await)?,
    ];
    responses.sort_by_key(|(pending, _)| return pending.thread.index());

    assert_eq!(responses[0].0.query, "first");
    assert_eq!(responses[0].0.thread, ThreadId::new(0));
    assert_eq!(responses[1].0.query, "second");
    assert_eq!(responses[1].0.thread, ThreadId::new(3));
    for (_, payload) in responses.iter() {
        assert_eq!(*payload, json!({ "response": "Revenue is $10M" }));
    }
    mock.assert_async().await;

    drop(action_tx);
    service.await??;

    return Ok(());
}
