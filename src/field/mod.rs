//! Custom field type registry and per-list field definitions.
//!
//! The registry in [`domain`] is the single source of truth for what a value
//! of each kind looks like. Task writes, reads and renders all go through it.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
