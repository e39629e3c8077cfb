use alert_enricher::{
    controllers::notification::NotificationController,
    domain::notification::{EnrichmentSettings, NotificationService},
    infrastructure::{
        alerts::{alert_endpoint, AlertClient},
        http::build_router,
        oauth::{keycloak::token_endpoint, KeycloakTokenClient},
        repositories::{InMemoryNotificationCenter, SharedSettingsStore},
        tls::{PinnedHostTrustPolicy, TrustedHttpClients},
    },
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use uuid::Uuid;

pub mod api_client;
pub mod mock_backend;

use api_client::TestClient;
use mock_backend::MockBackend;

pub const REALM: &str = "master";
pub const STORED_REFRESH_TOKEN: &str = "stored-refresh-token";
pub const EXTENSION_DEADLINE: Duration = Duration::from_millis(750);

pub struct TestContext {
    pub client: TestClient,
    pub backend: MockBackend,
    pub settings_path: PathBuf,
}

impl TestContext {
    /// Overwrite the shared settings file the way the main app does
    pub fn write_settings(&self, settings: serde_json::Value) {
        std::fs::write(&self.settings_path, settings.to_string())
            .expect("Failed to write shared settings");
    }

    pub fn read_settings(&self) -> serde_json::Value {
        let raw = std::fs::read(&self.settings_path).expect("Failed to read shared settings");
        serde_json::from_slice(&raw).expect("Shared settings are not JSON")
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let backend = MockBackend::start().await;

            let settings_dir = std::env::temp_dir().join(format!("alert-enricher-e2e-{}", Uuid::new_v4()));
            std::fs::create_dir_all(&settings_dir).expect("Failed to create settings dir");
            let settings_path = settings_dir.join("settings.json");
            std::fs::write(
                &settings_path,
                serde_json::json!({ "refreshToken": STORED_REFRESH_TOKEN }).to_string(),
            )
            .expect("Failed to seed shared settings");

            let http_clients = Arc::new(
                TrustedHttpClients::new(
                    Arc::new(PinnedHostTrustPolicy::new(&backend.host)),
                    Duration::from_secs(5),
                )
                .expect("Failed to build HTTP clients"),
            );

            let token_client = KeycloakTokenClient::new(
                &token_endpoint("http", &backend.host, REALM),
                "openremote".to_string(),
                http_clients.clone(),
            )
            .expect("Failed to create token client");
            let alert_client = AlertClient::new(
                &alert_endpoint("http", &backend.host, REALM),
                http_clients,
            )
            .expect("Failed to create alert client");

            let notification_center = Arc::new(InMemoryNotificationCenter::new());
            let notification_service = Arc::new(NotificationService::new(
                Arc::new(SharedSettingsStore::new(settings_path.clone(), "refreshToken")),
                Arc::new(token_client),
                Arc::new(alert_client),
                notification_center.clone(),
                EnrichmentSettings::default(),
            ));
            let controller = Arc::new(NotificationController::new(
                notification_service,
                notification_center,
                EXTENSION_DEADLINE,
            ));

            let app = build_router(controller);
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&format!("http://{}", addr)),
                backend,
                settings_path,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async move {
            if let Some(dir) = self.settings_path.parent() {
                let _ = std::fs::remove_dir_all(dir);
            }
        }
    }
}
