//! Application services for the field definition store.

mod definitions;

pub use definitions::{
    CreateFieldRequest, FieldDefinitionService, FieldServiceError, FieldServiceResult,
    UpdateFieldRequest,
};
