//! Adapter implementations of the list ports.

pub mod memory;
pub mod postgres;
