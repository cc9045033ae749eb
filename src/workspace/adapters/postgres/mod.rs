//! `PostgreSQL` adapters for workspace and user persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresUserRepository, PostgresWorkspaceRepository};
