//! Domain model for custom field definitions and their value registry.

mod definition;
mod error;
mod ids;
mod kind;
mod options;
mod value;

pub use definition::{FieldDefinition, FieldDraft, FieldPatch, FieldPlacement};
pub use error::{FieldDomainError, FieldShapeError, FieldValueError};
pub use ids::FieldId;
pub use kind::{FieldKind, ValueShape};
pub use options::{FieldSettings, SelectOption, validate_definition_shape};
pub use value::{parse_date, render_value, validate_value};
