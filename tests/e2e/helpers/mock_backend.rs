use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Canned answer of one mocked endpoint
#[derive(Clone)]
pub struct CannedResponse {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl CannedResponse {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn raw(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
struct BackendState {
    token_response: Option<CannedResponse>,
    alert_response: Option<CannedResponse>,
    token_forms: Vec<HashMap<String, String>>,
    alert_authorizations: Vec<String>,
}

/// Keycloak token endpoint and alert resource served on an ephemeral port
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
    pub host: String,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(BackendState::default()));

        let app = Router::new()
            .route(
                "/auth/realms/:realm/protocol/openid-connect/token",
                post(token),
            )
            .route("/api/:realm/notification/alert", get(alerts))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to get mock backend addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            host: addr.to_string(),
        }
    }

    pub fn grant_access_token(&self, access_token: &str) {
        self.set_token_response(CannedResponse::json(
            StatusCode::OK,
            json!({
                "access_token": access_token,
                "expires_in": 300,
                "token_type": "Bearer"
            }),
        ));
    }

    pub fn set_token_response(&self, response: CannedResponse) {
        self.state.lock().token_response = Some(response);
    }

    pub fn set_alert_response(&self, response: CannedResponse) {
        self.state.lock().alert_response = Some(response);
    }

    pub fn serve_alerts(&self, alerts: Value) {
        self.set_alert_response(CannedResponse::json(StatusCode::OK, alerts));
    }

    pub fn token_forms(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().token_forms.clone()
    }

    pub fn alert_authorizations(&self) -> Vec<String> {
        self.state.lock().alert_authorizations.clone()
    }
}

async fn respond(canned: Option<CannedResponse>) -> impl IntoResponse {
    let canned = canned.unwrap_or_else(|| CannedResponse::raw(StatusCode::NOT_FOUND, ""));
    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }
    (
        canned.status,
        [("content-type", "application/json")],
        canned.body,
    )
}

async fn token(
    State(state): State<Arc<Mutex<BackendState>>>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let canned = {
        let mut state = state.lock();
        state.token_forms.push(form);
        state.token_response.clone()
    };
    respond(canned).await
}

async fn alerts(
    State(state): State<Arc<Mutex<BackendState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let canned = {
        let mut state = state.lock();
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        state.alert_authorizations.push(authorization);
        state.alert_response.clone()
    };
    respond(canned).await
}
