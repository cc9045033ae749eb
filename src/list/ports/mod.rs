//! Port contracts for list storage.

pub mod repository;

pub use repository::{ListRepository, ListRepositoryError, ListRepositoryResult};
