//! `/api/lists/:list_id/fields`

use super::{confirmed, created, ok, ok_with_message};
use crate::api::ApiResult;
use crate::field::{
    domain::{FieldDefinition, FieldId},
    services::{CreateFieldRequest, UpdateFieldRequest},
};
use crate::http::AppState;
use crate::list::domain::ListId;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

/// Lists a list's field definitions in display order.
///
/// # Errors
///
/// Returns a not-found error when the list is not in the workspace.
pub async fn list_fields(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
) -> ApiResult<Vec<FieldDefinition>> {
    let Path(list_id) = path?;
    let ctx = state.context().await?;
    Ok(ok(state.fields.list(&ctx, list_id).await?))
}

/// Creates a field definition.
///
/// # Errors
///
/// Returns a validation error for a blank name, unknown type or missing
/// options.
pub async fn create_field(
    State(state): State<AppState>,
    path: Result<Path<ListId>, PathRejection>,
    payload: Result<Json<CreateFieldRequest>, JsonRejection>,
) -> ApiResult<FieldDefinition> {
    let Path(list_id) = path?;
    let Json(request) = payload?;
    let ctx = state.context().await?;
    let field = state.fields.create(&ctx, list_id, request).await?;
    Ok(created(field, "Custom field created successfully"))
}

/// Returns one field definition.
///
/// # Errors
///
/// Returns a not-found error when the list or field does not match.
pub async fn get_field(
    State(state): State<AppState>,
    path: Result<Path<(ListId, FieldId)>, PathRejection>,
) -> ApiResult<FieldDefinition> {
    let Path((list_id, field_id)) = path?;
    let ctx = state.context().await?;
    Ok(ok(state.fields.get(&ctx, list_id, field_id).await?))
}

/// Applies a partial update to a field definition.
///
/// # Errors
///
/// Returns a validation or not-found error.
pub async fn update_field(
    State(state): State<AppState>,
    path: Result<Path<(ListId, FieldId)>, PathRejection>,
    payload: Result<Json<UpdateFieldRequest>, JsonRejection>,
) -> ApiResult<FieldDefinition> {
    let Path((list_id, field_id)) = path?;
    let Json(request) = payload?;
    let ctx = state.context().await?;
    let field = state.fields.update(&ctx, list_id, field_id, request).await?;
    Ok(ok_with_message(field, "Custom field updated successfully"))
}

/// Deletes a field definition; task values for it are left in place.
///
/// # Errors
///
/// Returns a not-found error when the list or field does not match.
pub async fn delete_field(
    State(state): State<AppState>,
    path: Result<Path<(ListId, FieldId)>, PathRejection>,
) -> ApiResult<()> {
    let Path((list_id, field_id)) = path?;
    let ctx = state.context().await?;
    state.fields.delete(&ctx, list_id, field_id).await?;
    Ok(confirmed("Custom field deleted successfully"))
}
