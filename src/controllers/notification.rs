use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    domain::notification::{NotificationCategory, NotificationContent, NotificationRequest, NotificationService},
    error::AppResult,
    infrastructure::{auth::RequestId, repositories::NotificationCenter},
};

pub struct NotificationController {
    notification_service: Arc<NotificationService>,
    notification_center: Arc<dyn NotificationCenter>,
    deadline: Duration,
}

impl NotificationController {
    pub fn new(
        notification_service: Arc<NotificationService>,
        notification_center: Arc<dyn NotificationCenter>,
        deadline: Duration,
    ) -> Self {
        Self {
            notification_service,
            notification_center,
            deadline,
        }
    }

    /// POST /api/notifications/enrich - Enrich a received silent push
    ///
    /// Always answers 200 with the content to display; failures are reported
    /// in the notification body.
    pub async fn enrich(
        State(controller): State<Arc<NotificationController>>,
        Extension(request_id): Extension<RequestId>,
        payload: Result<Json<NotificationRequest>, JsonRejection>,
    ) -> AppResult<Json<NotificationContent>> {
        let Json(mut request) = payload?;
        if request.identifier.is_empty() {
            request.identifier = request_id.0.clone();
        }

        tracing::info!(
            request_id = %request_id.0,
            deadline_ms = controller.deadline.as_millis() as u64,
            "Enrichment requested"
        );

        let content = controller
            .notification_service
            .process_with_deadline(request, controller.deadline)
            .await;

        Ok(Json(content))
    }

    /// GET /api/notifications/categories - Categories currently registered
    pub async fn list_categories(
        State(controller): State<Arc<NotificationController>>,
    ) -> Json<Vec<NotificationCategory>> {
        let mut categories: Vec<_> = controller
            .notification_center
            .notification_categories()
            .into_iter()
            .collect();
        categories.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Json(categories)
    }
}
