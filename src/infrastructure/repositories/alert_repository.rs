use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert request failed: {0}")]
    Transport(String),
    #[error("alert endpoint returned status {0}")]
    Status(u16),
    #[error("could not decode alert response: {0}")]
    Decode(String),
}

/// Source of alert details for the current user.
///
/// Implementations return the list exactly as served, elements still raw:
/// only the one picked for display has to be a well-formed alert.
#[async_trait]
pub trait AlertDetailRepository: Send + Sync {
    async fn fetch_alerts(&self, access_token: &str) -> Result<Vec<Value>, AlertError>;
}
