//! Application services for the task record store.

mod records;

pub use records::{
    CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest,
};
