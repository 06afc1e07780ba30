//! Role-scoped query construction for task listing.
//!
//! The builder turns a caller's raw filter/sort/pagination request plus
//! their access scope into one immutable [`TaskQuery`] value. It performs
//! no I/O; repositories consume the query description. Filter and sort
//! keys are resolved against strict allow-lists so caller-supplied strings
//! are never spliced into a store predicate.

mod filter;
mod page;
mod request;
mod sort;

pub use filter::{Scope, TaskPredicate};
pub use page::{FieldSelection, PageCursor, Pagination, TaskPage, task_to_json};
pub use request::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, ListTasksRequest};
pub use sort::{SortField, SortOrder, SortableField};

use thiserror::Error;

/// Errors raised while interpreting a caller's list request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// A query parameter key is not on the allow-list.
    #[error("unrecognized query parameter: {0}")]
    UnknownParameter(String),

    /// A sort field is not on the allow-list.
    #[error("unrecognized sort field: {0}")]
    UnknownSortField(String),

    /// A recognized parameter carried a value that failed to parse.
    #[error("invalid value '{value}' for query parameter '{key}'")]
    InvalidParameter {
        /// Offending parameter key.
        key: String,
        /// Offending parameter value.
        value: String,
    },
}

/// Immutable, side-effect-free description of one task listing.
///
/// Produced once by [`build_query`] and passed downward; no shared mutable
/// request state crosses helper boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Combined access-scope and caller-filter predicate.
    pub predicate: TaskPredicate,
    /// Total ordering applied to matching tasks.
    pub sort: SortOrder,
    /// Number of matching records to skip.
    pub skip: i64,
    /// Maximum number of records to return.
    pub limit: i64,
    /// Clamped 1-based page number.
    pub page: u32,
    /// Clamped page size.
    pub page_size: u32,
    /// Optional projection applied to serialized results.
    pub projection: Option<FieldSelection>,
}

/// Builds a [`TaskQuery`] from the caller's scope and raw list request.
///
/// The scope is combined with (AND'ed against) every caller-supplied
/// filter; a caller can never widen visibility through filters.
///
/// # Errors
///
/// Returns [`QueryError`] when the sort expression references a field
/// outside the allow-list.
pub fn build_query(scope: Scope, request: &ListTasksRequest) -> Result<TaskQuery, QueryError> {
    let sort = SortOrder::parse(request.sort.as_deref())?;
    let page = request.page.unwrap_or(DEFAULT_PAGE).max(1);
    let page_size = request.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let skip = i64::from(page - 1) * i64::from(page_size);

    Ok(TaskQuery {
        predicate: TaskPredicate {
            scope,
            status: request.status,
            priority: request.priority,
            due_before: request.due_date_before,
            due_after: request.due_date_after,
        },
        sort,
        skip,
        limit: i64::from(page_size),
        page,
        page_size,
        projection: request.select.as_deref().map(FieldSelection::parse),
    })
}
