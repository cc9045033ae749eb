//! In-memory field definition adapters.

mod field;

pub use field::InMemoryFieldDefinitionRepository;
