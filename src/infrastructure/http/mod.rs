use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controllers::{health, notification::NotificationController};
use crate::infrastructure::auth::request_id_middleware;
use crate::infrastructure::config::Config;

/// Build the router serving the notification host adapter
pub fn build_router(notification_controller: Arc<NotificationController>) -> Router {
    let notification_routes = Router::new()
        .route("/api/notifications/enrich", post(NotificationController::enrich))
        .route(
            "/api/notifications/categories",
            get(NotificationController::list_categories),
        )
        .with_state(notification_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(notification_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    notification_controller: Arc<NotificationController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(notification_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
