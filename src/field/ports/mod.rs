//! Port contracts for custom field definition storage.

pub mod repository;

pub use repository::{
    FieldDefinitionRepository, FieldRepositoryError, FieldRepositoryResult,
};

#[cfg(test)]
pub use repository::MockFieldDefinitionRepository;
