#[cfg(test)]
#[path = "just_ask_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Api;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct QueryRequest {
    question: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RegisterRequest {
    username: String,
    password: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    detail: Option<Value>,
}

/// Pulls FastAPI's `detail` out of an error body. Validation errors carry a
/// list rather than a string, which is returned as JSON text.
fn error_detail(body: &str) -> Option<String> {
    let res: ErrorResponse = serde_json::from_str(body).ok()?;
    return match res.detail? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => Some(other.to_string()),
    };
}

pub struct JustAskApi {
    url: String,
    timeout: String,
    client: reqwest::Client,
}

impl Default for JustAskApi {
    fn default() -> JustAskApi {
        return JustAskApi::new(
            &Config::get(ConfigKey::ApiURL),
            &Config::get(ConfigKey::ApiHealthCheckTimeout),
        );
    }
}

impl JustAskApi {
    pub fn new(url: &str, timeout: &str) -> JustAskApi {
        return JustAskApi {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
            client: reqwest::Client::new(),
        };
    }
}

#[async_trait]
impl Api for JustAskApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Just Ask AI API URL is not defined");
        }

        let res = self
            .client
            .get(format!("{url}/", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Just Ask AI API is not reachable");
                bail!("Just Ask AI API is not reachable");
            }
        };

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Just Ask AI API health check failed"
            );
            bail!("Just Ask AI API health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn query(&self, question: &str) -> Result<Value> {
        let req = QueryRequest {
            question: question.to_string(),
        };

        let res = self
            .client
            .post(format!("{url}/query", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make query request to Just Ask AI"
            );
            bail!("Failed to make query request to Just Ask AI");
        }

        let text = res.text().await?;
        tracing::debug!(body = text.as_str(), "Query response");

        let payload = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
        return Ok(payload);
    }

    #[allow(clippy::implicit_return)]
    async fn login(&self, username: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(format!("{url}/auth/token", url = self.url))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status, "Login failed");
            match error_detail(&body) {
                Some(detail) => bail!(detail),
                None => bail!("Login failed"),
            }
        }

        let token = res.json::<TokenResponse>().await?;
        return Ok(token.access_token);
    }

    #[allow(clippy::implicit_return)]
    async fn register(&self, username: &str, password: &str) -> Result<()> {
        let req = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let res = self
            .client
            .post(format!("{url}/auth/register", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status = status, "Registration failed");
            match error_detail(&body) {
                Some(detail) => bail!(detail),
                None => bail!("Registration failed"),
            }
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn verify_token(&self, token: &str) -> Result<()> {
        let res = self
            .client
            .get(format!("{url}/auth/verify-token", url = self.url))
            .bearer_auth(token)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Token was rejected");
            bail!("Token was rejected");
        }

        return Ok(());
    }
}
