//! Task lifecycle, role-scoped querying, and completion analytics.
//!
//! Every operation in this module is evaluated against the caller's
//! identity: queries are pre-scoped so restricted callers can never see
//! tasks they do not own or hold, and mutations check authorization
//! against the loaded aggregate before any write. Mutations that affect
//! other users return notification requests as explicit post-commit side
//! effects. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Pure query construction in [`query`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Lifecycle and leaderboard services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;

#[cfg(test)]
mod tests;
