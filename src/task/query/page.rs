//! Pagination metadata, field projection, and the task listing page.

use crate::task::domain::Task;
use serde::Serialize;
use serde_json::Value;

/// Cursor pointing at an adjacent page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    /// 1-based page number.
    pub page: u32,
    /// Page size carried forward.
    pub limit: u32,
}

/// Previous/next cursors for a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Pagination {
    /// Cursor for the previous page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageCursor>,
    /// Cursor for the next page, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageCursor>,
}

impl Pagination {
    /// Derives cursors for the given page against the total match count.
    #[must_use]
    pub fn for_page(page: u32, limit: u32, total: u64) -> Self {
        let skip = u64::from(page.saturating_sub(1)) * u64::from(limit);
        let prev = (skip > 0).then(|| PageCursor {
            page: page.saturating_sub(1),
            limit,
        });
        let next = (skip + u64::from(limit) < total).then(|| PageCursor {
            page: page.saturating_add(1),
            limit,
        });
        Self { prev, next }
    }
}

/// Caller-requested projection to a subset of task fields.
///
/// Unknown field names simply produce no output key; the task identifier
/// is always retained, mirroring the behavior of the store this API
/// originally fronted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<String>,
}

impl FieldSelection {
    /// Parses a comma-separated field list.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let fields = raw
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect();
        Self { fields }
    }

    /// Returns the selected field names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Projects a task onto the selected fields.
    #[must_use]
    pub fn apply(&self, task: &Task) -> Value {
        match task_to_json(task) {
            Value::Object(mut map) => {
                map.retain(|key, _| key == "id" || self.fields.iter().any(|field| field == key));
                Value::Object(map)
            }
            other => other,
        }
    }
}

/// Serializes a task to its wire representation.
#[must_use]
pub fn task_to_json(task: &Task) -> Value {
    serde_json::json!(task)
}

/// One page of a task listing plus its response metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPage {
    /// Number of items on this page.
    pub count: usize,
    /// Total number of matching tasks across all pages.
    pub total: u64,
    /// Previous/next page cursors.
    pub pagination: Pagination,
    /// Serialized (and possibly projected) task records.
    pub items: Vec<Value>,
}

impl TaskPage {
    /// Assembles a page from serialized items and pagination metadata.
    #[must_use]
    pub fn new(items: Vec<Value>, total: u64, pagination: Pagination) -> Self {
        Self {
            count: items.len(),
            total,
            pagination,
            items,
        }
    }
}
