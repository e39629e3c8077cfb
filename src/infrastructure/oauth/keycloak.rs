use anyhow::Context;
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;

use super::TokenProvider;
use crate::domain::auth::{TokenError, TokenGrant, TokenResponse};
use crate::infrastructure::tls::TrustedHttpClients;

/// Token endpoint of a Keycloak realm
pub fn token_endpoint(scheme: &str, host: &str, realm: &str) -> String {
    format!(
        "{}://{}/auth/realms/{}/protocol/openid-connect/token",
        scheme, host, realm
    )
}

pub struct KeycloakTokenClient {
    token_url: Url,
    client_id: String,
    http_clients: Arc<TrustedHttpClients>,
}

impl KeycloakTokenClient {
    pub fn new(
        token_url: &str,
        client_id: String,
        http_clients: Arc<TrustedHttpClients>,
    ) -> anyhow::Result<Self> {
        let token_url = Url::parse(token_url)
            .with_context(|| format!("Invalid token endpoint URL: {}", token_url))?;

        Ok(Self {
            token_url,
            client_id,
            http_clients,
        })
    }
}

#[async_trait]
impl TokenProvider for KeycloakTokenClient {
    /// Refresh grant against the realm token endpoint.
    ///
    /// The response body is inspected whatever the status: Keycloak answers
    /// `400 invalid_grant` with a JSON error document when the refresh token
    /// expired or was revoked.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, TokenError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
        ];

        tracing::debug!(
            url = %self.token_url,
            lenient_tls = self.http_clients.is_lenient_for(&self.token_url),
            "Refreshing access token"
        );

        let response = self
            .http_clients
            .for_url(&self.token_url)
            .post(self.token_url.clone())
            .header("Accept", "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| TokenError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TokenError::Transport(e.to_string()))?;

        let token: TokenResponse =
            serde_json::from_slice(&body).map_err(|e| TokenError::Decode {
                status,
                reason: e.to_string(),
            })?;

        match token.access_token {
            Some(access_token) if !access_token.is_empty() => Ok(TokenGrant {
                access_token,
                refresh_token: token.refresh_token.filter(|t| !t.is_empty()),
            }),
            _ => Err(TokenError::MissingAccessToken {
                status,
                error: token.error,
                description: token.error_description,
            }),
        }
    }
}
