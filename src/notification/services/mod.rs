//! Notification services: the per-user inbox and the post-commit
//! side-effect dispatcher.

mod dispatch;
mod inbox;

pub use dispatch::NotificationDispatcher;
pub use inbox::{NotificationService, NotificationServiceError, NotificationServiceResult};
