//! Task records for Trellis.
//!
//! Tasks live in a list and carry built-in fields plus custom field entries
//! keyed against the list's field definitions. Entries are validated against
//! the live definitions when written and resolved against them when read.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
