use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use alert_enricher::controllers::notification::NotificationController;
use alert_enricher::domain::notification::NotificationService;
use alert_enricher::infrastructure::alerts::AlertClient;
use alert_enricher::infrastructure::config::{Config, LogFormat};
use alert_enricher::infrastructure::http::start_http_server;
use alert_enricher::infrastructure::oauth::KeycloakTokenClient;
use alert_enricher::infrastructure::repositories::{InMemoryNotificationCenter, SharedSettingsStore};
use alert_enricher::infrastructure::tls::{PinnedHostTrustPolicy, TrustedHttpClients};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting alert enricher on {}:{} for backend {}",
        config.host,
        config.port,
        config.backend_host
    );

    // TLS trust: only the backend host gets its certificate accepted as is
    let trust_policy = Arc::new(PinnedHostTrustPolicy::new(&config.backend_host));
    tracing::info!(pinned_host = %trust_policy.host(), "TLS trust policy configured");
    let http_clients = Arc::new(TrustedHttpClients::new(
        trust_policy,
        config.request_timeout(),
    )?);

    let token_url = config.token_url();
    let alert_url = config.alert_url();
    tracing::info!(token_url = %token_url, alert_url = %alert_url, "Backend endpoints resolved");

    let credential_store = Arc::new(SharedSettingsStore::new(
        config.shared_settings_path.clone(),
        config.refresh_token_key.clone(),
    ));
    tracing::info!(
        path = %credential_store.path().display(),
        key = %config.refresh_token_key,
        "Shared settings store ready"
    );

    let token_client = Arc::new(KeycloakTokenClient::new(
        &token_url,
        config.client_id.clone(),
        http_clients.clone(),
    )?);
    let alert_client = Arc::new(AlertClient::new(&alert_url, http_clients)?);
    let notification_center = Arc::new(InMemoryNotificationCenter::new());

    let notification_service = Arc::new(NotificationService::new(
        credential_store,
        token_client,
        alert_client,
        notification_center.clone(),
        config.enrichment_settings(),
    ));

    let notification_controller = Arc::new(NotificationController::new(
        notification_service,
        notification_center,
        config.extension_deadline(),
    ));

    let config = Arc::new(config);
    start_http_server(config, notification_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let default_filter = if config.is_development() {
        "alert_enricher=debug,tower_http=debug"
    } else {
        "alert_enricher=info,tower_http=info"
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| default_filter.into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
