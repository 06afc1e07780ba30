//! Adapter implementations of the notification persistence port.

pub mod memory;
pub mod postgres;
