//! `/api/lists/:list_id/tasks`

use super::{confirmed, created, ok, ok_with_message};
use crate::api::ApiResult;
use crate::http::AppState;
use crate::list::domain::ListId;
use crate::task::{
    domain::{TaskId, TaskQueryParams, TaskView},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};

/// Returns the list's tasks, filtered and sorted by the query string.
///
/// # Errors
///
/// Returns a validation error for malformed parameters.
pub async fn query_tasks(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
    params: Result<Query<TaskQueryParams>, QueryRejection>,
) -> ApiResult<Vec<TaskView>> {
    let Path(list_id) = path?;
    let Query(params) = params?;
    let ctx = state.context().await?;
    Ok(ok(state.tasks.query(&ctx, list_id, &params).await?))
}

/// Creates a task.
///
/// # Errors
///
/// Returns a validation error for a blank name or ill-typed custom field
/// value.
pub async fn create_task(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<TaskView> {
    let Path(list_id) = path?;
    let Json(request) = payload?;
    let ctx = state.context().await?;
    let task = state.tasks.create(&ctx, list_id, request).await?;
    Ok(created(task, "Task created successfully"))
}

/// Returns one task.
///
/// # Errors
///
/// Returns a not-found error when the list or task does not match.
pub async fn get_task(
    State(state): State<AppState>,
    path: Result<Path<(ListId, TaskId)>, PathRejection>,
) -> ApiResult<TaskView> {
    let Path((list_id, task_id)) = path?;
    let ctx = state.context().await?;
    Ok(ok(state.tasks.get(&ctx, list_id, task_id).await?))
}

/// Applies a partial update to a task.
///
/// # Errors
///
/// Returns a validation or not-found error.
pub async fn update_task(
    State(state): State<AppState>,
    path: Result<Path<(ListId, TaskId)>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<TaskView> {
    let Path((list_id, task_id)) = path?;
    let Json(request) = payload?;
    let ctx = state.context().await?;
    let task = state.tasks.update(&ctx, list_id, task_id, request).await?;
    Ok(ok_with_message(task, "Task updated successfully"))
}

/// Deletes a task.
///
/// # Errors
///
/// Returns a not-found error when the list or task does not match.
pub async fn delete_task(
    State(state): State<AppState>,
    path: Result<Path<(ListId, TaskId)>, PathRejection>,
) -> ApiResult<()> {
    let Path((list_id, task_id)) = path?;
    let ctx = state.context().await?;
    state.tasks.delete(&ctx, list_id, task_id).await?;
    Ok(confirmed("Task deleted successfully"))
}
