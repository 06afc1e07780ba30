//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the maximum length.
    #[error("task title of {length} characters exceeds the {limit}-character limit")]
    TitleTooLong {
        /// Actual title length in characters.
        length: usize,
        /// Maximum permitted length.
        limit: usize,
    },

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The task description exceeds the maximum length.
    #[error("task description of {length} characters exceeds the {limit}-character limit")]
    DescriptionTooLong {
        /// Actual description length in characters.
        length: usize,
        /// Maximum permitted length.
        limit: usize,
    },
}

/// Error returned while parsing task statuses from external input or
/// persistence. Out-of-enum values are rejected, never coerced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from external input or
/// persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
