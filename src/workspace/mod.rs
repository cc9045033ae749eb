//! Workspace singleton and user records.
//!
//! A deployment bootstraps one user and one workspace on first access; every
//! other context scopes its data to that workspace through
//! [`crate::context::RequestContext`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
