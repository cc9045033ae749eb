//! `/api/workspace`

use super::{ok, ok_with_message};
use crate::api::ApiResult;
use crate::http::AppState;
use crate::workspace::{domain::Workspace, services::{Bootstrapped, UpdateWorkspaceRequest}};
use axum::{Json, extract::State, extract::rejection::JsonRejection};

/// Returns the bootstrap workspace and user, creating them on first access.
///
/// # Errors
///
/// Returns an internal error when bootstrapping fails.
pub async fn get_workspace(State(state): State<AppState>) -> ApiResult<Bootstrapped> {
    Ok(ok(state.bootstrapped().await?))
}

/// Applies a partial update to the workspace.
///
/// # Errors
///
/// Returns a validation error for a malformed body or blank name.
pub async fn update_workspace(
    State(state): State<AppState>,
    payload: Result<Json<UpdateWorkspaceRequest>, JsonRejection>,
) -> ApiResult<Workspace> {
    let Json(request) = payload?;
    let ctx = state.context().await?;
    let workspace = state.workspaces.update(&ctx, request).await?;
    Ok(ok_with_message(workspace, "Workspace updated successfully"))
}
