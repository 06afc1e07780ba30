//! `PostgreSQL` adapter for durable notification storage.

mod models;
mod repository;
mod schema;

pub use repository::{NotificationPgPool, PostgresNotificationRepository};
