//! Raw task-listing request as received from the caller.

use super::QueryError;
use crate::task::domain::{TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// Default 1-based page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Caller-supplied filter, sort, and pagination parameters.
///
/// All fields are typed; raw key/value pairs enter only through
/// [`ListTasksRequest::from_pairs`], which rejects any key outside the
/// allow-list rather than interpreting it as a store operator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListTasksRequest {
    /// Exact-match status filter.
    pub status: Option<TaskStatus>,
    /// Exact-match priority filter.
    pub priority: Option<TaskPriority>,
    /// Inclusive due-date upper bound.
    pub due_date_before: Option<DateTime<Utc>>,
    /// Inclusive due-date lower bound.
    pub due_date_after: Option<DateTime<Utc>>,
    /// Raw sort expression; interpreted by the query builder.
    pub sort: Option<String>,
    /// Raw comma-separated projection field list.
    pub select: Option<String>,
    /// 1-based page number; defaults to [`DEFAULT_PAGE`].
    pub page: Option<u32>,
    /// Page size; defaults to [`DEFAULT_PAGE_SIZE`].
    pub limit: Option<u32>,
}

impl ListTasksRequest {
    /// Creates an empty request (default filters, sort, and pagination).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw query key/value pairs.
    ///
    /// Recognized keys: `status`, `priority`, `dueDateBefore`,
    /// `dueDateAfter`, `sort`, `select`, `page`, `limit`. Date bounds use
    /// RFC 3339. Later duplicates overwrite earlier values.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownParameter`] for any key outside the
    /// allow-list and [`QueryError::InvalidParameter`] when a recognized
    /// key carries an unparseable value.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::new();
        for (key, value) in pairs {
            match key {
                "status" => {
                    request.status = Some(
                        TaskStatus::try_from(value)
                            .map_err(|_| invalid_parameter(key, value))?,
                    );
                }
                "priority" => {
                    request.priority = Some(
                        TaskPriority::try_from(value)
                            .map_err(|_| invalid_parameter(key, value))?,
                    );
                }
                "dueDateBefore" => {
                    request.due_date_before = Some(parse_date(key, value)?);
                }
                "dueDateAfter" => {
                    request.due_date_after = Some(parse_date(key, value)?);
                }
                "sort" => {
                    request.sort = Some(value.to_owned());
                }
                "select" => {
                    request.select = Some(value.to_owned());
                }
                "page" => {
                    request.page = Some(parse_positive(key, value)?);
                }
                "limit" => {
                    request.limit = Some(parse_positive(key, value)?);
                }
                _ => return Err(QueryError::UnknownParameter(key.to_owned())),
            }
        }
        Ok(request)
    }
}

fn parse_date(key: &str, value: &str) -> Result<DateTime<Utc>, QueryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| invalid_parameter(key, value))
}

fn parse_positive(key: &str, value: &str) -> Result<u32, QueryError> {
    value
        .parse::<u32>()
        .map_err(|_| invalid_parameter(key, value))
}

fn invalid_parameter(key: &str, value: &str) -> QueryError {
    QueryError::InvalidParameter {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}
