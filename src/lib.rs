//! Taskhub: task visibility and lifecycle engine.
//!
//! This crate provides the core functionality for a multi-user task
//! tracker: role-scoped task queries, an authorized mutation lifecycle
//! with notification side effects, and per-user completion analytics.
//!
//! # Architecture
//!
//! Taskhub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task aggregate, query builder, lifecycle and leaderboard services
//! - [`user`]: Caller identity and the read-only user directory
//! - [`notification`]: Notification records, inbox service, and dispatcher

pub mod notification;
pub mod task;
pub mod user;
