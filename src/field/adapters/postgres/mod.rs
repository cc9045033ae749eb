//! `PostgreSQL` adapters for field definition persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresFieldDefinitionRepository;
