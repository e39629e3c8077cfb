use serde::{Deserialize, Serialize};
use std::fmt;

pub const ACTION_ACTUATOR: &str = "ACTUATOR";
pub const ACTION_DEEP_LINK: &str = "LINK";

/// Alert detail as returned by the alert resource endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDetail {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub app_url: Option<String>,
    #[serde(default)]
    pub actions: Vec<AlertAction>,
}

/// Action suggested by the backend for an alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertAction {
    pub title: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    /// Remaining fields (asset id, attribute, value...) are kept verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    Actuator,
    DeepLink,
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::Actuator => ACTION_ACTUATOR,
            ActionType::DeepLink => ACTION_DEEP_LINK,
            ActionType::Other(tag) => tag,
        }
    }
}

impl From<String> for ActionType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            ACTION_ACTUATOR => ActionType::Actuator,
            ACTION_DEEP_LINK => ActionType::DeepLink,
            _ => ActionType::Other(tag),
        }
    }
}

impl From<ActionType> for String {
    fn from(action_type: ActionType) -> Self {
        action_type.as_str().to_string()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
