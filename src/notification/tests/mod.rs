//! Unit tests for the notification module.

mod dispatch_tests;
