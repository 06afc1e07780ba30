//! User directory and identity-provider boundary types.
//!
//! The core never issues or verifies credentials; the surrounding service
//! layer resolves each request to a [`domain::Caller`] and the core trusts
//! it completely. This module also exposes the read-only user directory
//! consulted when validating assignments and enumerating leaderboard
//! participants. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
