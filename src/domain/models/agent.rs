use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// The three ways an exchange with the agent can fail, distinguished by
/// where the failure occurred. The variants are mutually exclusive: a
/// request settles as exactly one of them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent, or no response was received at all.
    /// Covers DNS failures, refused connections, and timeout expiry.
    #[error("failed to reach the agent: {0}")]
    Transport(#[source] reqwest::Error),

    /// A response was received, but its status code sits outside [200,299].
    /// The body is not interpreted.
    #[error("the agent returned status code {0}")]
    Server(u16),

    /// A success response whose body does not parse into the expected shape.
    #[error("the agent response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

#[async_trait]
pub trait Agent {
    /// Used at session start to verify the agent endpoint is reachable
    /// before the first query is sent.
    async fn health_check(&self) -> Result<()>;

    /// Performs exactly one network exchange for the given query, returning
    /// the decoded reply text or a classified failure. At most one attempt
    /// is made per call; no retries.
    async fn send(&self, query: &str) -> Result<String, TransportError>;
}

pub type AgentBox = Box<dyn Agent + Send + Sync>;
