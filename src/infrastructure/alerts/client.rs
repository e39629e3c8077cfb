use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;

use crate::infrastructure::repositories::{AlertDetailRepository, AlertError};
use crate::infrastructure::tls::TrustedHttpClients;

/// Queued alert notifications of the authenticated user
pub fn alert_endpoint(scheme: &str, host: &str, realm: &str) -> String {
    format!("{}://{}/api/{}/notification/alert", scheme, host, realm)
}

pub struct AlertClient {
    resource_url: Url,
    http_clients: Arc<TrustedHttpClients>,
}

impl AlertClient {
    pub fn new(resource_url: &str, http_clients: Arc<TrustedHttpClients>) -> anyhow::Result<Self> {
        let resource_url = Url::parse(resource_url)
            .with_context(|| format!("Invalid alert resource URL: {}", resource_url))?;

        Ok(Self {
            resource_url,
            http_clients,
        })
    }
}

#[async_trait]
impl AlertDetailRepository for AlertClient {
    async fn fetch_alerts(&self, access_token: &str) -> Result<Vec<Value>, AlertError> {
        let response = self
            .http_clients
            .for_url(&self.resource_url)
            .get(self.resource_url.clone())
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AlertError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %self.resource_url, "Alert request rejected");
            return Err(AlertError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AlertError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| AlertError::Decode(e.to_string()))
    }
}
