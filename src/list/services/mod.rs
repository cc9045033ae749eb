//! Application services for lists and the cascade delete policy.

mod cascade;
mod lists;

pub use cascade::{CascadeDeletion, CascadeError, CascadeProgress, CascadeStep};
pub use lists::{CreateListRequest, ListService, ListServiceError, ListServiceResult};
