use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait Api {
    /// Used at startup to verify the API is reachable before chatting.
    async fn health_check(&self) -> Result<()>;

    /// Submits a question and returns the raw JSON payload. Payloads that are
    /// not JSON are returned as a string value so callers can still interpret
    /// them. Transport failures and non-OK statuses are errors.
    async fn query(&self, question: &str) -> Result<Value>;

    /// Exchanges a username and password for an access token. Failures carry
    /// the backend's `detail` message when one was returned.
    async fn login(&self, username: &str, password: &str) -> Result<String>;

    async fn register(&self, username: &str, password: &str) -> Result<()>;

    /// Succeeds only when the backend accepts the bearer token.
    async fn verify_token(&self, token: &str) -> Result<()>;
}

pub type ApiBox = Box<dyn Api + Send + Sync>;
