//! Task lists and the cascade delete policy.
//!
//! A list exclusively owns its tasks and field definitions; deleting it
//! removes both. See [`services::ListService::delete`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
