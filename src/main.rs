#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::ApiBox;
use domain::models::Event;
use domain::models::ResponseFormat;
use domain::services::AuthGate;
use domain::services::AuthOutcome;
use domain::services::Flow;
use domain::services::SessionStore;
use infrastructure::api::JustAskApi;
use infrastructure::storage::FileTokenStore;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::login;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Just Ask AI has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn run_chat(api: &ApiBox, session: SessionStore) -> Result<Flow> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(Box::<JustAskApi>::default(), event_tx, &mut action_rx)
            .await;
    });

    let ui_future = ui::start(api, session, action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(Err(err))) => Err(err),
            Some(Err(join_err)) => Err(join_err.into()),
            _ => Ok(Flow::Quit),
        },
        res = ui_future => res,
    );

    return res;
}

/// Alternates between the login prompt and the chat view until the user quits.
async fn run() -> Result<()> {
    let format =
        ResponseFormat::parse(&Config::get(ConfigKey::ResponseFormat)).unwrap_or_default();
    let api: ApiBox = Box::<JustAskApi>::default();
    let tokens = FileTokenStore::default();

    loop {
        let gate = AuthGate::new(&api, &tokens);
        let mut session = None;
        let outcome = gate.mount(&mut session, format).await?;

        let session = match (outcome, session) {
            (AuthOutcome::Granted(_), Some(session)) => session,
            _ => {
                if !login::sign_in(&api, &tokens).await? {
                    return Ok(());
                }
                continue;
            }
        };

        match run_chat(&api, session).await? {
            Flow::SignOut => {
                gate.sign_out()?;
            }
            Flow::Quit | Flow::Continue => {
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("justask")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => (),
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    if let Err(err) = run().await {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
