use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::dto::AlertDetail;
use super::error::EnrichmentError;
use super::mapping::apply_alert_detail;
use super::model::{NotificationContent, NotificationRequest};
use crate::infrastructure::oauth::TokenProvider;
use crate::infrastructure::repositories::{
    AlertDetailRepository, CredentialStore, NotificationCenter,
};

pub const DEFAULT_CATEGORY_IDENTIFIER: &str = "openremoteNotification";
pub const DEFAULT_EXPIRY_TITLE: &str = "You received an alarm from blok61 :";
pub const DEFAULT_EXPIRY_BODY: &str = "Please open application to check what's happening";

/// Completion handler supplied by the host
pub type ContentHandler = Box<dyn FnOnce(NotificationContent) + Send + 'static>;

#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    pub category_identifier: String,
    pub expiry_title: String,
    pub expiry_body: String,
}

impl EnrichmentSettings {
    fn expired_content(&self, best_attempt: &NotificationContent) -> NotificationContent {
        let mut content = best_attempt.clone();
        content.title = self.expiry_title.clone();
        content.body = self.expiry_body.clone();
        content
    }
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            category_identifier: DEFAULT_CATEGORY_IDENTIFIER.to_string(),
            expiry_title: DEFAULT_EXPIRY_TITLE.to_string(),
            expiry_body: DEFAULT_EXPIRY_BODY.to_string(),
        }
    }
}

/// Holds the host's completion handler until the first completion
struct CompletionSlot {
    handler: Mutex<Option<ContentHandler>>,
}

impl CompletionSlot {
    fn new(handler: ContentHandler) -> Self {
        Self {
            handler: Mutex::new(Some(handler)),
        }
    }

    /// Returns false when the content was already delivered
    fn complete(&self, content: NotificationContent) -> bool {
        let handler = self.handler.lock().take();
        match handler {
            Some(handler) => {
                handler(content);
                true
            }
            None => false,
        }
    }
}

/// In-flight enrichment of one received notification
pub struct ExtensionTask {
    slot: Arc<CompletionSlot>,
    best_attempt: NotificationContent,
    settings: EnrichmentSettings,
    handle: JoinHandle<()>,
}

impl ExtensionTask {
    /// The host is about to terminate the extension.
    ///
    /// Stops the enrichment and delivers the fallback content unless the
    /// handler already ran. Returns whether the fallback was delivered.
    pub fn time_will_expire(&self) -> bool {
        self.handle.abort();

        let content = self.settings.expired_content(&self.best_attempt);
        let delivered = self.slot.complete(content);
        if delivered {
            tracing::warn!("Extension time expired before enrichment finished");
        }
        delivered
    }
}

pub struct NotificationService {
    credential_store: Arc<dyn CredentialStore>,
    token_provider: Arc<dyn TokenProvider>,
    alert_repo: Arc<dyn AlertDetailRepository>,
    notification_center: Arc<dyn NotificationCenter>,
    settings: EnrichmentSettings,
}

impl NotificationService {
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        token_provider: Arc<dyn TokenProvider>,
        alert_repo: Arc<dyn AlertDetailRepository>,
        notification_center: Arc<dyn NotificationCenter>,
        settings: EnrichmentSettings,
    ) -> Self {
        Self {
            credential_store,
            token_provider,
            alert_repo,
            notification_center,
            settings,
        }
    }

    /// Start enriching `request`; `handler` is called exactly once, either
    /// by the enrichment or by [`ExtensionTask::time_will_expire`].
    pub fn did_receive(
        self: &Arc<Self>,
        request: NotificationRequest,
        handler: ContentHandler,
    ) -> ExtensionTask {
        tracing::info!(
            identifier = %request.identifier,
            user_info = ?request.content.user_info,
            "Notification received"
        );

        let slot = Arc::new(CompletionSlot::new(handler));
        let best_attempt = request.content;

        let service = Arc::clone(self);
        let task_slot = Arc::clone(&slot);
        let content = best_attempt.clone();
        let identifier = request.identifier;
        let handle = tokio::spawn(async move {
            let enriched = service.enrich(content).await;
            if !task_slot.complete(enriched) {
                tracing::debug!(identifier = %identifier, "Enrichment finished after expiry");
            }
        });

        ExtensionTask {
            slot,
            best_attempt,
            settings: self.settings.clone(),
            handle,
        }
    }

    /// Run the enrichment under a deadline and return whatever was delivered
    pub async fn process_with_deadline(
        self: &Arc<Self>,
        request: NotificationRequest,
        deadline: Duration,
    ) -> NotificationContent {
        let (tx, mut rx) = oneshot::channel();
        let task = self.did_receive(
            request,
            Box::new(move |content| {
                let _ = tx.send(content);
            }),
        );

        match tokio::time::timeout(deadline, &mut rx).await {
            Ok(Ok(content)) => return content,
            Ok(Err(_)) => return self.settings.expired_content(&task.best_attempt),
            Err(_) => {}
        }

        // Either the fallback or a completion that raced the deadline is in flight
        task.time_will_expire();
        rx.await
            .unwrap_or_else(|_| self.settings.expired_content(&task.best_attempt))
    }

    /// Enrich `content`, replacing the body with the failure description
    /// when any step fails.
    pub async fn enrich(&self, mut content: NotificationContent) -> NotificationContent {
        if let Err(err) = self.try_enrich(&mut content).await {
            tracing::warn!(error = %err, "Notification enrichment failed");
            content.body = err.to_string();
        }
        content
    }

    async fn try_enrich(&self, content: &mut NotificationContent) -> Result<(), EnrichmentError> {
        let refresh_token = self
            .credential_store
            .refresh_token()
            .await?
            .ok_or(EnrichmentError::MissingRefreshToken)?;

        let grant = self.token_provider.refresh(&refresh_token).await?;

        if let Some(rotated) = grant.refresh_token.as_deref() {
            if rotated != refresh_token {
                if let Err(e) = self.credential_store.save_refresh_token(rotated).await {
                    tracing::warn!(error = %e, "Failed to persist rotated refresh token");
                }
            }
        }

        let alerts = self.alert_repo.fetch_alerts(&grant.access_token).await?;
        let first = alerts.first().cloned().ok_or(EnrichmentError::UndecodableDetail)?;
        let detail: AlertDetail = serde_json::from_value(first).map_err(|e| {
            tracing::debug!(error = %e, "First alert is not a well-formed alert detail");
            EnrichmentError::UndecodableDetail
        })?;

        let category = apply_alert_detail(content, &detail, &self.settings.category_identifier);
        tracing::info!(
            category = %category.identifier,
            actions = category.actions.len(),
            alert_count = alerts.len(),
            "Notification content enriched"
        );
        self.notification_center
            .set_notification_categories(HashSet::from([category]));

        Ok(())
    }
}
