#[cfg(test)]
#[path = "login_form_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ApiBox;
use crate::domain::models::TokenStore;

pub const MISSING_FIELDS_TEXT: &str = "Please fill in all fields";

/// Username and password as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: &str, password: &str) -> LoginForm {
        return LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        };
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() {
            bail!(MISSING_FIELDS_TEXT);
        }

        return Ok(());
    }

    /// Exchanges the credentials for a token and persists it. Nothing is sent
    /// when validation fails.
    pub async fn submit(&self, api: &ApiBox, tokens: &dyn TokenStore) -> Result<()> {
        self.validate()?;

        let token = api.login(&self.username, &self.password).await?;
        tokens.set(&token)?;

        tracing::debug!(username = self.username.as_str(), "Logged in");
        return Ok(());
    }

    pub async fn register(&self, api: &ApiBox) -> Result<()> {
        self.validate()?;

        api.register(&self.username, &self.password).await?;

        tracing::debug!(username = self.username.as_str(), "Registered");
        return Ok(());
    }
}
