//! Domain model for notification records.

mod ids;
mod notification;

pub use ids::NotificationId;
pub use notification::{Notification, NotificationRequest, PersistedNotificationData};
