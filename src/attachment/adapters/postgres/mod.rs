//! `PostgreSQL` adapters for attachment metadata.

mod models;
mod repository;
mod schema;

pub use repository::PostgresAttachmentRepository;
