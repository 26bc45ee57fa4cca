use std::env;
use std::io;
use std::path;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::login;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiBox;
use crate::domain::models::ResponseFormat;
use crate::domain::services::actions::help_text;
use crate::domain::services::AuthGate;
use crate::infrastructure::api::JustAskApi;
use crate::infrastructure::storage::FileTokenStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("JUSTASK_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("justask");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    let parent = config_file_path
        .parent()
        .ok_or_else(|| return anyhow!("Config file path has no parent directory"))?;
    if !parent.exists() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for Just Ask AI")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running with environment variable RUST_LOG=justask")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .long(ConfigKey::ApiURL.to_string())
        .env("JUSTASK_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the Just Ask AI API. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_api_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::ApiHealthCheckTimeout.to_string())
        .long(ConfigKey::ApiHealthCheckTimeout.to_string())
        .env("JUSTASK_API_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds before timing out when doing a healthcheck for the API. [default: {}]", Config::default(ConfigKey::ApiHealthCheckTimeout)),
        )
        .global(true);
}

fn arg_response_format() -> Arg {
    return Arg::new(ConfigKey::ResponseFormat.to_string())
        .short('f')
        .long(ConfigKey::ResponseFormat.to_string())
        .env("JUSTASK_RESPONSE_FORMAT")
        .num_args(1)
        .help(format!(
            "How answers are read from the API. Tabular also shows SQL query results. [default: {}]",
            Config::default(ConfigKey::ResponseFormat)
        ))
        .value_parser(PossibleValuesParser::new(ResponseFormat::VARIANTS))
        .global(true);
}

fn arg_token_file() -> Arg {
    return Arg::new(ConfigKey::TokenFile.to_string())
        .long(ConfigKey::TokenFile.to_string())
        .env("JUSTASK_TOKEN_FILE")
        .num_args(1)
        .help(format!(
            "Path to the file holding the sign in token. [default: {}]",
            Config::default(ConfigKey::TokenFile)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("justask")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Sign in if needed and start chatting. This is the default."))
        .subcommand(Command::new("login").about("Sign in and store the token without opening the chat."))
        .subcommand(Command::new("logout").about("Forget the stored sign in token."))
        .subcommand(Command::new("register").about("Create a new account on the Just Ask AI API."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("JUSTASK_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(arg_api_url())
        .arg(arg_api_health_check_timeout())
        .arg(arg_response_format())
        .arg(arg_token_file());
}

async fn load(matches: &ArgMatches, subcmd_matches: Option<&ArgMatches>) -> Result<()> {
    let mut all_matches = vec![matches];
    if let Some(subcmd_matches) = subcmd_matches {
        all_matches.push(subcmd_matches);
    }

    return Config::load(build(), all_matches).await;
}

/// Handles every subcommand that does not open the chat. Returns true when the
/// chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            load(&matches, Some(subcmd_matches)).await?;
        }
        Some(("login", subcmd_matches)) => {
            load(&matches, Some(subcmd_matches)).await?;
            let api: ApiBox = Box::<JustAskApi>::default();
            login::sign_in(&api, &FileTokenStore::default()).await?;
            return Ok(false);
        }
        Some(("logout", subcmd_matches)) => {
            load(&matches, Some(subcmd_matches)).await?;
            let api: ApiBox = Box::<JustAskApi>::default();
            AuthGate::new(&api, &FileTokenStore::default()).sign_out()?;
            println!("Signed out.");
            return Ok(false);
        }
        Some(("register", subcmd_matches)) => {
            load(&matches, Some(subcmd_matches)).await?;
            let api: ApiBox = Box::<JustAskApi>::default();
            login::register(&api).await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            load(&matches, None).await?;
        }
    }

    return Ok(true);
}
