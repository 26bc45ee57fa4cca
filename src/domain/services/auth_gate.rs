#[cfg(test)]
#[path = "auth_gate_test.rs"]
mod tests;

use anyhow::Result;

use super::SessionStore;
use crate::domain::models::ApiBox;
use crate::domain::models::ResponseFormat;
use crate::domain::models::TokenStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The stored token was accepted by the backend.
    Granted(String),
    /// The user must sign in again.
    Redirect,
}

/// Guards the chat view behind the persisted credential token.
pub struct AuthGate<'a> {
    api: &'a ApiBox,
    tokens: &'a dyn TokenStore,
}

impl<'a> AuthGate<'a> {
    pub fn new(api: &'a ApiBox, tokens: &'a dyn TokenStore) -> AuthGate<'a> {
        return AuthGate { api, tokens };
    }

    /// Verifies the stored token once. A missing token redirects without
    /// contacting the backend, a rejected one is removed before redirecting.
    pub async fn check(&self) -> Result<AuthOutcome> {
        let token = match self.tokens.get()? {
            Some(token) => token,
            None => {
                tracing::debug!("No stored token, redirecting to login");
                return Ok(AuthOutcome::Redirect);
            }
        };

        if let Err(err) = self.api.verify_token(&token).await {
            tracing::error!(error = ?err, "Token verification failed");
            self.tokens.remove()?;
            return Ok(AuthOutcome::Redirect);
        }

        return Ok(AuthOutcome::Granted(token));
    }

    /// Runs the check and, when access is granted, makes sure a session exists
    /// with at least one thread. `session` is left untouched on redirect.
    pub async fn mount(
        &self,
        session: &mut Option<SessionStore>,
        format: ResponseFormat,
    ) -> Result<AuthOutcome> {
        let outcome = self.check().await?;
        if let AuthOutcome::Granted(_) = outcome {
            session
                .get_or_insert_with(|| return SessionStore::new(format))
                .initialize();
        }

        return Ok(outcome);
    }

    /// Forgets the stored token. There is no server side invalidation.
    pub fn sign_out(&self) -> Result<()> {
        self.tokens.remove()?;
        tracing::debug!("Signed out");
        return Ok(());
    }
}
