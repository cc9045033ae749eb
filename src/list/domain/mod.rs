//! Domain model for task lists.

mod error;
mod ids;
mod list;

pub use error::ListDomainError;
pub use ids::ListId;
pub use list::{DEFAULT_LIST_COLOR, DEFAULT_LIST_ICON, ListPatch, TaskList};
