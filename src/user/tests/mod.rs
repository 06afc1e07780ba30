//! Unit tests for the user module.

mod domain_tests;
