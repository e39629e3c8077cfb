pub mod keycloak;

use crate::domain::auth::{TokenError, TokenGrant};
use async_trait::async_trait;

pub use keycloak::KeycloakTokenClient;

/// Exchanges a long-lived refresh token for a short-lived access token
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, TokenError>;
}
