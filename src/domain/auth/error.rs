#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token request failed: {0}")]
    Transport(String),
    #[error("could not decode token response (status {status}): {reason}")]
    Decode { status: u16, reason: String },
    #[error(
        "token endpoint returned status {status} without an access token{}",
        oauth_reason(.error, .description)
    )]
    MissingAccessToken {
        status: u16,
        error: Option<String>,
        description: Option<String>,
    },
}

fn oauth_reason(error: &Option<String>, description: &Option<String>) -> String {
    match (error, description) {
        (Some(error), Some(description)) => format!(": {} ({})", error, description),
        (Some(error), None) => format!(": {}", error),
        (None, Some(description)) => format!(": {}", description),
        (None, None) => String::new(),
    }
}
