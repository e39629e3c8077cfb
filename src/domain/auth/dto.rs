use serde::{Deserialize, Serialize};

/// Raw OpenID Connect token endpoint response.
///
/// Every field is optional: an error response carries `error` and
/// `error_description` instead of tokens.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Outcome of a successful refresh grant
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Set when the server rotated the refresh token
    pub refresh_token: Option<String>,
}
