pub mod alert_repository;
pub mod category_repository;
pub mod credential_repository;

pub use alert_repository::{AlertDetailRepository, AlertError};
pub use category_repository::{InMemoryNotificationCenter, NotificationCenter};
pub use credential_repository::{
    CredentialError, CredentialStore, InMemoryCredentialStore, SharedSettingsStore,
};
