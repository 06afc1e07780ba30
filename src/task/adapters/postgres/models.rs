//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Creator's user identifier.
    pub created_by: uuid::Uuid,
    /// Assignee user identifiers.
    pub assigned_to: Vec<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and full-record update model for task records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Workflow status.
    pub status: String,
    /// Priority level.
    pub priority: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Creator's user identifier.
    pub created_by: uuid::Uuid,
    /// Assignee user identifiers.
    pub assigned_to: Vec<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}
