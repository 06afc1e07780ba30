//! Cross-user notifications produced by task mutations.
//!
//! Notifications are durable advisory records: they are appended as a
//! post-commit side effect of task mutations, consumed through a per-user
//! inbox, and only ever mutated by flipping their read flag. Enqueue
//! failures are logged and swallowed; they never abort the triggering
//! mutation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Inbox service and side-effect dispatcher in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
