//! Per-user notification inbox service.

use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{NotificationRepository, NotificationRepositoryError},
};
use crate::user::domain::{AuthContext, IdentityError};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for notification inbox operations.
#[derive(Debug, Clone, Error)]
pub enum NotificationServiceError {
    /// The request carried no resolved caller identity.
    #[error(transparent)]
    Unauthorized(#[from] IdentityError),

    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// The notification belongs to another user.
    #[error("not authorized to update this notification")]
    Forbidden,

    /// Underlying persistence failure; internal detail is not exposed.
    #[error("notification store failure")]
    Store(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl From<NotificationRepositoryError> for NotificationServiceError {
    fn from(err: NotificationRepositoryError) -> Self {
        match err {
            NotificationRepositoryError::NotFound(id) => Self::NotFound(id),
            NotificationRepositoryError::Persistence(source) => Self::Store(source),
        }
    }
}

/// Result type for notification inbox operations.
pub type NotificationServiceResult<T> = Result<T, NotificationServiceError>;

/// Inbox operations over a caller's own notification queue.
#[derive(Clone)]
pub struct NotificationService<N>
where
    N: NotificationRepository,
{
    repository: Arc<N>,
}

impl<N> NotificationService<N>
where
    N: NotificationRepository,
{
    /// Creates a new inbox service.
    #[must_use]
    pub const fn new(repository: Arc<N>) -> Self {
        Self { repository }
    }

    /// Lists the caller's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Unauthorized`] without a caller
    /// identity, or [`NotificationServiceError::Store`] on persistence
    /// failure.
    pub async fn list(&self, auth: &AuthContext) -> NotificationServiceResult<Vec<Notification>> {
        let caller = auth.caller()?;
        Ok(self.repository.list_for_user(caller.id()).await?)
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::NotFound`] when the record is
    /// absent and [`NotificationServiceError::Forbidden`] when it belongs
    /// to another user; ownership is checked before any mutation.
    pub async fn mark_read(
        &self,
        auth: &AuthContext,
        id: NotificationId,
    ) -> NotificationServiceResult<Notification> {
        let caller = auth.caller()?;
        let notification = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(NotificationServiceError::NotFound(id))?;
        if notification.user_id() != caller.id() {
            return Err(NotificationServiceError::Forbidden);
        }
        Ok(self.repository.mark_read(id).await?)
    }

    /// Marks all of the caller's unread notifications as read, returning
    /// how many changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationServiceError::Unauthorized`] without a caller
    /// identity, or [`NotificationServiceError::Store`] on persistence
    /// failure.
    pub async fn mark_all_read(&self, auth: &AuthContext) -> NotificationServiceResult<u64> {
        let caller = auth.caller()?;
        Ok(self.repository.mark_all_read(caller.id()).await?)
    }
}
