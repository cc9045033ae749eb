//! Adapter implementations of the field definition ports.

pub mod memory;
pub mod postgres;
