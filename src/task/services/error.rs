//! Service-level error taxonomy for task lifecycle operations.

use crate::task::domain::{TaskDomainError, TaskId};
use crate::task::ports::TaskRepositoryError;
use crate::task::query::QueryError;
use crate::user::domain::{IdentityError, UserId};
use crate::user::ports::UserRepositoryError;
use std::sync::Arc;
use thiserror::Error;

/// Errors reported to callers of the task lifecycle service.
///
/// Authorization and not-found failures are terminal for the request;
/// nothing in this core retries.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// The request carried no resolved caller identity; rejected before
    /// any store access.
    #[error(transparent)]
    Unauthorized(#[from] IdentityError),

    /// Domain validation failed; no partial mutation occurred.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// The list request could not be interpreted.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// An assignment request carried no user identifiers.
    #[error("assignee list must not be empty")]
    EmptyAssigneeList,

    /// The caller's identity is valid but lacks scope for this task.
    #[error("not authorized to {action} this task")]
    Forbidden {
        /// The operation that was refused.
        action: &'static str,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Underlying persistence failure; internal detail is not exposed.
    #[error("task store failure")]
    Store(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            TaskRepositoryError::Persistence(source) => Self::Store(source),
            duplicate @ TaskRepositoryError::DuplicateTask(_) => Self::Store(Arc::new(duplicate)),
        }
    }
}

impl From<UserRepositoryError> for TaskServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::Persistence(source) => Self::Store(source),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
