//! Unit tests for the task module.
//!
//! Tests are organised by concern: domain rules, query construction,
//! lifecycle orchestration, status transitions, assignment, and the
//! leaderboard aggregation.

mod fixtures;

mod service_tests;
