//! `PostgreSQL` adapters for list persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresListRepository;
