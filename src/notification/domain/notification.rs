//! Notification aggregate and the side-effect request that produces it.

use super::NotificationId;
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Pending notification produced by a committed task mutation.
///
/// Lifecycle mutations return these as an explicit side-effect list; the
/// dispatcher turns each into a durable [`Notification`] after the task
/// record has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Target user.
    pub user_id: UserId,
    /// Task the notification refers to.
    pub task_id: TaskId,
    /// Message text.
    pub message: String,
}

impl NotificationRequest {
    /// Notification for a user assigned at task creation.
    #[must_use]
    pub fn assigned_to_new_task(user_id: UserId, task_id: TaskId, title: &str) -> Self {
        Self {
            user_id,
            task_id,
            message: format!("You have been assigned to a new task: {title}"),
        }
    }

    /// Notification for a user newly assigned to an existing task.
    #[must_use]
    pub fn assigned_to_task(user_id: UserId, task_id: TaskId, title: &str) -> Self {
        Self {
            user_id,
            task_id,
            message: format!("You have been assigned to task: {title}"),
        }
    }

    /// Notification for a task's creator when someone else completes it.
    #[must_use]
    pub fn task_completed(user_id: UserId, task_id: TaskId, title: &str) -> Self {
        Self {
            user_id,
            task_id,
            message: format!("Task \"{title}\" has been marked as completed"),
        }
    }
}

/// Durable per-user notification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: NotificationId,
    user_id: UserId,
    task_id: TaskId,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Persisted notification identifier.
    pub id: NotificationId,
    /// Persisted target user.
    pub user_id: UserId,
    /// Persisted related task.
    pub task_id: TaskId,
    /// Persisted message text.
    pub message: String,
    /// Persisted read flag.
    pub read: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an unread notification from a side-effect request.
    #[must_use]
    pub fn new(request: NotificationRequest, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            user_id: request.user_id,
            task_id: request.task_id,
            message: request.message,
            read: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a notification from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            task_id: data.task_id,
            message: data.message,
            read: data.read,
            created_at: data.created_at,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the target user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the related task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` once the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips the read flag; the only permitted mutation.
    pub const fn mark_read(&mut self) {
        self.read = true;
    }
}
