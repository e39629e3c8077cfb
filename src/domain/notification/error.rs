use crate::domain::auth::TokenError;
use crate::infrastructure::repositories::{AlertError, CredentialError};

pub const UNDECODABLE_DETAIL: &str = "could not deserialize JSON";

/// Failure of one enrichment step.
///
/// The `Display` output is what ends up in the notification body, so the
/// messages are written for the person reading the notification.
#[derive(Debug, thiserror::Error)]
pub enum EnrichmentError {
    #[error("no refresh token stored")]
    MissingRefreshToken,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Alert(AlertError),
    #[error("could not deserialize JSON")]
    UndecodableDetail,
}

impl From<AlertError> for EnrichmentError {
    fn from(err: AlertError) -> Self {
        match err {
            AlertError::Decode(_) => EnrichmentError::UndecodableDetail,
            other => EnrichmentError::Alert(other),
        }
    }
}
