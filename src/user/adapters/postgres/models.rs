//! Diesel row models for user directory access.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Access role.
    pub role: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
