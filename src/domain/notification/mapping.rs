use serde_json::{Map, Value};

use super::dto::{ActionType, AlertDetail};
use super::model::{ActionOptions, NotificationAction, NotificationCategory, NotificationContent};

pub const USER_INFO_APP_URL: &str = "appUrl";
pub const USER_INFO_ALERT_ID: &str = "alertId";
pub const USER_INFO_ACTIONS: &str = "actions";

/// Copy an alert detail onto the notification content and build the category
/// declared by its actions.
///
/// Actuator actions are destructive, deep links open the app in the
/// foreground, anything else is skipped. The last actuator action is kept in
/// `user_info["actions"]` so the app can fire it when the button is tapped.
pub fn apply_alert_detail(
    content: &mut NotificationContent,
    detail: &AlertDetail,
    category_identifier: &str,
) -> NotificationCategory {
    content.category_identifier = category_identifier.to_string();
    content.title = detail.title.clone();
    content.body = detail.message.clone();
    // An absent value leaves no key behind, not even one the push carried
    set_or_remove(
        &mut content.user_info,
        USER_INFO_APP_URL,
        detail.app_url.clone().map(Value::String),
    );
    set_or_remove(&mut content.user_info, USER_INFO_ALERT_ID, detail.id.clone());

    let mut actions = Vec::with_capacity(detail.actions.len());
    for action in &detail.actions {
        let options = match action.action_type {
            ActionType::Actuator => {
                if let Ok(raw) = serde_json::to_value(action) {
                    content.user_info.insert(USER_INFO_ACTIONS.to_string(), raw);
                }
                ActionOptions::Destructive
            }
            ActionType::DeepLink => ActionOptions::Foreground,
            ActionType::Other(ref tag) => {
                tracing::debug!(action_type = %tag, "Skipping unsupported alert action");
                continue;
            }
        };

        actions.push(NotificationAction {
            identifier: action.action_type.to_string(),
            title: action.title.clone(),
            options,
        });
    }

    NotificationCategory::new(category_identifier, actions)
}

fn set_or_remove(user_info: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    match value {
        Some(value) => {
            user_info.insert(key.to_string(), value);
        }
        None => {
            user_info.remove(key);
        }
    }
}
