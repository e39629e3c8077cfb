use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const UPDATED_AT_SUFFIX: &str = "UpdatedAt";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("could not access shared settings {path}: {reason}")]
    Io { path: String, reason: String },
    #[error("shared settings {path} are not a JSON object: {reason}")]
    Decode { path: String, reason: String },
    #[error("setting {0} is not a string")]
    InvalidValue(String),
}

/// Credentials shared between the main app and the extension
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored refresh token, `None` when the user never logged in
    async fn refresh_token(&self) -> Result<Option<String>, CredentialError>;

    /// Replace the stored refresh token (the server may rotate it on refresh)
    async fn save_refresh_token(&self, token: &str) -> Result<(), CredentialError>;
}

/// Settings file shared by every process of the app group.
///
/// The file is a flat JSON object; only the refresh token key (and its
/// `<key>UpdatedAt` timestamp) is owned by this store, other keys are
/// preserved on write.
pub struct SharedSettingsStore {
    path: PathBuf,
    refresh_token_key: String,
    write_lock: tokio::sync::Mutex<()>,
}

impl SharedSettingsStore {
    pub fn new(path: impl Into<PathBuf>, refresh_token_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            refresh_token_key: refresh_token_key.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>, CredentialError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Map::new());
        }

        serde_json::from_slice(&raw).map_err(|e| CredentialError::Decode {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn io_error(&self, err: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl CredentialStore for SharedSettingsStore {
    async fn refresh_token(&self) -> Result<Option<String>, CredentialError> {
        let settings = self.load().await?;
        match settings.get(&self.refresh_token_key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(token)) if token.is_empty() => Ok(None),
            Some(Value::String(token)) => Ok(Some(token.clone())),
            Some(_) => Err(CredentialError::InvalidValue(self.refresh_token_key.clone())),
        }
    }

    async fn save_refresh_token(&self, token: &str) -> Result<(), CredentialError> {
        let _guard = self.write_lock.lock().await;

        let mut settings = self.load().await?;
        settings.insert(self.refresh_token_key.clone(), Value::String(token.to_string()));
        settings.insert(
            format!("{}{}", self.refresh_token_key, UPDATED_AT_SUFFIX),
            Value::String(Utc::now().to_rfc3339()),
        );

        let encoded = serde_json::to_vec_pretty(&settings).map_err(|e| CredentialError::Decode {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        // Readers in other processes must never observe a half-written file
        let tmp_path = self.path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4()));
        tokio::fs::write(&tmp_path, encoded)
            .await
            .map_err(|e| self.io_error(e))?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(self.io_error(e));
        }

        tracing::debug!(path = %self.path.display(), "Refresh token saved to shared settings");
        Ok(())
    }
}

/// Process-local store, used when embedding the service or in tests
#[derive(Default)]
pub struct InMemoryCredentialStore {
    refresh_token: Mutex<Option<String>>,
}

impl InMemoryCredentialStore {
    pub fn new(refresh_token: Option<String>) -> Self {
        Self {
            refresh_token: Mutex::new(refresh_token),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn refresh_token(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.refresh_token.lock().clone())
    }

    async fn save_refresh_token(&self, token: &str) -> Result<(), CredentialError> {
        *self.refresh_token.lock() = Some(token.to_string());
        Ok(())
    }
}
