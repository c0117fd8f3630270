#[cfg(test)]
#[path = "exa_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Agent;
use crate::domain::models::TransportError;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatRequest {
    query: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatResponse {
    pub response: String,
}

pub struct Exa {
    url: String,
    auth_secret: String,
    timeout: String,
    health_check_timeout: String,
}

impl Default for Exa {
    fn default() -> Exa {
        return Exa {
            url: Config::get(ConfigKey::AgentUrl),
            auth_secret: Config::get(ConfigKey::AuthSecret),
            timeout: Config::get(ConfigKey::RequestTimeout),
            health_check_timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl Exa {
    fn request_timeout(&self) -> Duration {
        // Sized for a slow language-model backend. A garbled override falls
        // back to the 30 second default.
        return Duration::from_millis(self.timeout.parse::<u64>().unwrap_or(30_000));
    }
}

#[async_trait]
impl Agent for Exa {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Agent URL is not defined");
        }
        if self.auth_secret.is_empty() {
            bail!("Agent auth secret is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(
                self.health_check_timeout.parse::<u64>()?,
            ))
            .send()
            .await;

        // Any HTTP response counts as reachable. The service only routes the
        // chat endpoint, so the status code of the base URL means nothing.
        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Agent is not reachable");
            bail!("Agent is not reachable");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send(&self, query: &str) -> Result<String, TransportError> {
        let req = ChatRequest {
            query: query.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/agent/chat", url = self.url))
            .header("Content-Type", "application/json")
            .header("X-Exa-Auth", &self.auth_secret)
            .timeout(self.request_timeout())
            .json(&req)
            .send()
            .await
            .map_err(TransportError::Transport)?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make chat request to the agent"
            );
            return Err(TransportError::Server(res.status().as_u16()));
        }

        let body = res.text().await.map_err(TransportError::Transport)?;
        let decoded =
            serde_json::from_str::<ChatResponse>(&body).map_err(TransportError::Decode)?;
        tracing::debug!(body = ?decoded, "Chat response");

        return Ok(decoded.response);
    }
}
