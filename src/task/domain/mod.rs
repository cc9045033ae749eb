//! Domain model for tasks, their custom field values and queries.

mod custom_fields;
mod error;
mod ids;
mod query;
mod status;
mod task;
mod view;

pub use custom_fields::{CustomFieldEntries, CustomFieldValue, missing_required};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use query::{
    SortField, SortOrder, TaskFilter, TaskQuery, TaskQueryError, TaskQueryParams, TaskSort,
    tokenize,
};
pub use status::{Priority, TaskStatus};
pub use task::{Task, TaskChanges, TaskDraft, TaskPlacement, resolve_completed_at};
pub use view::{CustomFieldView, TaskView, UserReference};
