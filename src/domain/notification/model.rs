use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Silent push as handed over by the delivery pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub identifier: String,
    pub content: NotificationContent,
}

/// Visible notification content.
///
/// The service works on a mutable copy of the received content (the
/// "best attempt") and hands it back to the host exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContent {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category_identifier: String,
    #[serde(default)]
    pub user_info: Map<String, Value>,
}

/// Presentation options of an action button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOptions {
    Destructive,
    Foreground,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationAction {
    pub identifier: String,
    pub title: String,
    pub options: ActionOptions,
}

/// Group of actions attached to notifications carrying the same category id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationCategory {
    pub identifier: String,
    pub actions: Vec<NotificationAction>,
}

impl NotificationCategory {
    pub fn new(identifier: impl Into<String>, actions: Vec<NotificationAction>) -> Self {
        Self {
            identifier: identifier.into(),
            actions,
        }
    }
}
