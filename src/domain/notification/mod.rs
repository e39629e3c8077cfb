pub mod dto;
pub mod error;
pub mod mapping;
pub mod model;
pub mod service;

pub use dto::{ActionType, AlertAction, AlertDetail};
pub use error::{EnrichmentError, UNDECODABLE_DETAIL};
pub use mapping::apply_alert_detail;
pub use model::{
    ActionOptions, NotificationAction, NotificationCategory, NotificationContent,
    NotificationRequest,
};
pub use service::{ContentHandler, EnrichmentSettings, ExtensionTask, NotificationService};
