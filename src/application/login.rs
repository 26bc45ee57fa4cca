use std::io;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use dialoguer::Password;
use yansi::Paint;

use crate::domain::models::ApiBox;
use crate::domain::models::TokenStore;
use crate::domain::services::LoginForm;

fn is_interrupt(err: &dialoguer::Error) -> bool {
    match err {
        dialoguer::Error::IO(io_err) => return io_err.kind() == io::ErrorKind::Interrupted,
    }
}

/// Reads a username and password from the terminal. Returns `None` when the
/// user interrupts the prompt.
fn read_form(title: &str) -> Result<Option<LoginForm>> {
    println!("{}", Paint::new(title).bold());

    let theme = ColorfulTheme::default();
    let username = match Input::<String>::with_theme(&theme)
        .with_prompt("Username")
        .allow_empty(true)
        .interact_text()
    {
        Ok(username) => username,
        Err(err) if is_interrupt(&err) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let password = match Password::with_theme(&theme)
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
    {
        Ok(password) => password,
        Err(err) if is_interrupt(&err) => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    return Ok(Some(LoginForm::new(&username, &password)));
}

/// Prompts until the backend hands out a token. Returns false if the user gave
/// up instead.
pub async fn sign_in(api: &ApiBox, tokens: &dyn TokenStore) -> Result<bool> {
    loop {
        let form = match read_form("Sign in to Just Ask AI")? {
            Some(form) => form,
            None => return Ok(false),
        };

        match form.submit(api, tokens).await {
            Ok(()) => {
                println!("{}", Paint::green("Signed in."));
                return Ok(true);
            }
            Err(err) => {
                eprintln!("{}\n", Paint::red(err));
            }
        }
    }
}

pub async fn register(api: &ApiBox) -> Result<bool> {
    loop {
        let form = match read_form("Create a Just Ask AI account")? {
            Some(form) => form,
            None => return Ok(false),
        };

        match form.register(api).await {
            Ok(()) => {
                println!(
                    "{}",
                    Paint::green(format!(
                        "Registered {}. Run `justask login` to sign in.",
                        form.username
                    ))
                );
                return Ok(true);
            }
            Err(err) => {
                eprintln!("{}\n", Paint::red(err));
            }
        }
    }
}
