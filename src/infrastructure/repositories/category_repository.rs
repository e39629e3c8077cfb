use parking_lot::RwLock;
use std::collections::HashSet;

use crate::domain::notification::NotificationCategory;

/// Host notification center, the place where action categories live.
///
/// Registering replaces every previously registered category.
pub trait NotificationCenter: Send + Sync {
    fn set_notification_categories(&self, categories: HashSet<NotificationCategory>);

    fn notification_categories(&self) -> HashSet<NotificationCategory>;
}

#[derive(Default)]
pub struct InMemoryNotificationCenter {
    categories: RwLock<HashSet<NotificationCategory>>,
}

impl InMemoryNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn set_notification_categories(&self, categories: HashSet<NotificationCategory>) {
        tracing::debug!(count = categories.len(), "Registering notification categories");
        *self.categories.write() = categories;
    }

    fn notification_categories(&self) -> HashSet<NotificationCategory> {
        self.categories.read().clone()
    }
}
