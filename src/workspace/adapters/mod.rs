//! Adapter implementations of the workspace ports.

pub mod memory;
pub mod postgres;
