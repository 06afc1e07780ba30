//! Domain model for collaborative task records.
//!
//! The task domain models creation, field updates, status transitions, and
//! assignment while keeping authorization decisions on the aggregate and
//! all infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, NewTaskData, PersistedTaskData, Task, TaskChanges,
    TaskPriority, TaskStatus,
};
