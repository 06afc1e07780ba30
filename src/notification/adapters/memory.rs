//! In-memory notification repository for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError, NotificationRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory notification queue preserving append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<E: std::fmt::Display>(err: E) -> NotificationRepositoryError {
    NotificationRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn append(&self, notification: &Notification) -> NotificationRepositoryResult<()> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        notifications.push(notification.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: NotificationId,
    ) -> NotificationRepositoryResult<Option<Notification>> {
        let notifications = self.notifications.read().map_err(lock_error)?;
        Ok(notifications
            .iter()
            .find(|notification| notification.id() == id)
            .cloned())
    }

    async fn list_for_user(&self, user: UserId) -> NotificationRepositoryResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(lock_error)?;
        let mut for_user: Vec<Notification> = notifications
            .iter()
            .filter(|notification| notification.user_id() == user)
            .cloned()
            .collect();
        // Stable sort keeps append order for equal timestamps.
        for_user.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(for_user)
    }

    async fn mark_read(&self, id: NotificationId) -> NotificationRepositoryResult<Notification> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        let notification = notifications
            .iter_mut()
            .find(|notification| notification.id() == id)
            .ok_or(NotificationRepositoryError::NotFound(id))?;
        notification.mark_read();
        Ok(notification.clone())
    }

    async fn mark_all_read(&self, user: UserId) -> NotificationRepositoryResult<u64> {
        let mut notifications = self.notifications.write().map_err(lock_error)?;
        let mut changed = 0_u64;
        for notification in notifications
            .iter_mut()
            .filter(|notification| notification.user_id() == user && !notification.is_read())
        {
            notification.mark_read();
            changed += 1;
        }
        Ok(changed)
    }
}
