//! `/api/lists` and `/api/lists/:list_id`

use super::{created, ok, ok_with_message};
use crate::api::ApiResult;
use crate::http::AppState;
use crate::list::{
    domain::{ListId, ListPatch, TaskList},
    services::{CascadeDeletion, CreateListRequest},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

/// Lists the workspace's lists in display order.
///
/// # Errors
///
/// Returns an internal error when the lookup fails.
pub async fn list_lists(State(state): State<AppState>) -> ApiResult<Vec<TaskList>> {
    let ctx = state.context().await?;
    Ok(ok(state.lists.list(&ctx).await?))
}

/// Creates a list appended after the existing ones.
///
/// # Errors
///
/// Returns a validation error for a malformed body or blank name.
pub async fn create_list(
    State(state): State<AppState>,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> ApiResult<TaskList> {
    let Json(request) = payload?;
    let ctx = state.context().await?;
    let list = state.lists.create(&ctx, request).await?;
    Ok(created(list, "List created successfully"))
}

/// Returns one list.
///
/// # Errors
///
/// Returns a not-found error when the list is not in the workspace.
pub async fn get_list(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
) -> ApiResult<TaskList> {
    let Path(list_id) = path?;
    let ctx = state.context().await?;
    Ok(ok(state.lists.get(&ctx, list_id).await?))
}

/// Applies a partial update to a list.
///
/// # Errors
///
/// Returns a validation or not-found error.
pub async fn update_list(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
    payload: Result<Json<ListPatch>, JsonRejection>,
) -> ApiResult<TaskList> {
    let Path(list_id) = path?;
    let Json(patch) = payload?;
    let ctx = state.context().await?;
    let list = state.lists.update(&ctx, list_id, patch).await?;
    Ok(ok_with_message(list, "List updated successfully"))
}

/// Deletes a list with its tasks and field definitions.
///
/// # Errors
///
/// Returns a not-found error, or an internal error when the cascade stops
/// part-way.
pub async fn delete_list(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
) -> ApiResult<CascadeDeletion> {
    let Path(list_id) = path?;
    let ctx = state.context().await?;
    let deletion = state.lists.delete(&ctx, list_id).await?;
    Ok(ok_with_message(
        deletion,
        "List and all associated data deleted successfully",
    ))
}
