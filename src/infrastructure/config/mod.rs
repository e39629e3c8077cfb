use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::notification::service::{
    DEFAULT_CATEGORY_IDENTIFIER, DEFAULT_EXPIRY_BODY, DEFAULT_EXPIRY_TITLE,
};
use crate::domain::notification::EnrichmentSettings;
use crate::infrastructure::alerts::alert_endpoint;
use crate::infrastructure::oauth::keycloak::token_endpoint;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Backend
    pub backend_scheme: String,
    pub backend_host: String,
    pub realm: String,
    pub client_id: String,
    pub alert_resource_url: Option<String>,
    // Shared settings
    pub shared_settings_path: String,
    pub refresh_token_key: String,
    // Notification
    pub category_identifier: String,
    pub expiry_title: String,
    pub expiry_body: String,
    pub extension_deadline_secs: u64,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .as_str()
            {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            backend_scheme: env::var("BACKEND_SCHEME").unwrap_or_else(|_| "https".to_string()),
            backend_host: env::var("BACKEND_HOST")?,
            realm: env::var("REALM").unwrap_or_else(|_| "master".to_string()),
            client_id: env::var("CLIENT_ID").unwrap_or_else(|_| "openremote".to_string()),
            alert_resource_url: env::var("ALERT_RESOURCE_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            shared_settings_path: env::var("SHARED_SETTINGS_PATH")
                .unwrap_or_else(|_| "shared/settings.json".to_string()),
            refresh_token_key: env::var("REFRESH_TOKEN_KEY")
                .unwrap_or_else(|_| "refreshToken".to_string()),
            category_identifier: env::var("CATEGORY_IDENTIFIER")
                .unwrap_or_else(|_| DEFAULT_CATEGORY_IDENTIFIER.to_string()),
            expiry_title: env::var("EXPIRY_TITLE")
                .unwrap_or_else(|_| DEFAULT_EXPIRY_TITLE.to_string()),
            expiry_body: env::var("EXPIRY_BODY")
                .unwrap_or_else(|_| DEFAULT_EXPIRY_BODY.to_string()),
            extension_deadline_secs: env::var("EXTENSION_DEADLINE_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn token_url(&self) -> String {
        token_endpoint(&self.backend_scheme, &self.backend_host, &self.realm)
    }

    pub fn alert_url(&self) -> String {
        self.alert_resource_url
            .clone()
            .unwrap_or_else(|| alert_endpoint(&self.backend_scheme, &self.backend_host, &self.realm))
    }

    pub fn extension_deadline(&self) -> Duration {
        Duration::from_secs(self.extension_deadline_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn enrichment_settings(&self) -> EnrichmentSettings {
        EnrichmentSettings {
            category_identifier: self.category_identifier.clone(),
            expiry_title: self.expiry_title.clone(),
            expiry_body: self.expiry_body.clone(),
        }
    }
}
