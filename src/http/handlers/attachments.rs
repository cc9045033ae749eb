//! `/api/tasks/:task_id/attachments`

use super::{created, ok, ok_with_message};
use crate::api::{ApiError, ApiResult};
use crate::attachment::{
    domain::{Attachment, AttachmentId},
    services::{AttachmentDeletion, UploadRequest},
};
use crate::http::AppState;
use crate::task::domain::TaskId;
use axum::extract::{
    Multipart, Path, State,
    multipart::MultipartRejection,
    rejection::PathRejection,
};

/// Multipart part carrying the uploaded file.
pub const FILE_PART: &str = "file";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Lists a task's attachments, newest first.
///
/// # Errors
///
/// Returns a not-found error when the task is not in the workspace.
pub async fn list_attachments(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
) -> ApiResult<Vec<Attachment>> {
    let Path(task_id) = path?;
    let ctx = state.context().await?;
    Ok(ok(state.attachments.list(&ctx, task_id).await?))
}

/// Uploads the `file` part and records it against the task.
///
/// # Errors
///
/// Returns a validation error when no file part is present or the file is
/// refused by the upload policy.
pub async fn upload_attachment(
    State(state): State<AppState>,
    path: Result<Path<TaskId>, PathRejection>,
    upload: Result<Multipart, MultipartRejection>,
) -> ApiResult<Attachment> {
    let Path(task_id) = path?;
    let mut multipart = upload?;
    let request = read_file_part(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::validation("No file provided"))?;
    let ctx = state.context().await?;
    let attachment = state.attachments.upload(&ctx, task_id, request).await?;
    Ok(created(attachment, "File uploaded successfully"))
}

/// Returns one attachment.
///
/// # Errors
///
/// Returns a not-found error when the task or attachment does not match.
pub async fn get_attachment(
    State(state): State<AppState>,
    path: Result<Path<(TaskId, AttachmentId)>, PathRejection>,
) -> ApiResult<Attachment> {
    let Path((task_id, attachment_id)) = path?;
    let ctx = state.context().await?;
    Ok(ok(state.attachments.get(&ctx, task_id, attachment_id).await?))
}

/// Deletes an attachment's content and metadata.
///
/// # Errors
///
/// Returns a not-found error when the task or attachment does not match.
pub async fn delete_attachment(
    State(state): State<AppState>,
    path: Result<Path<(TaskId, AttachmentId)>, PathRejection>,
) -> ApiResult<AttachmentDeletion> {
    let Path((task_id, attachment_id)) = path?;
    let ctx = state.context().await?;
    let deletion = state
        .attachments
        .delete(&ctx, task_id, attachment_id)
        .await?;
    Ok(ok_with_message(deletion, "Attachment deleted successfully"))
}

async fn read_file_part(multipart: &mut Multipart) -> Result<Option<UploadRequest>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_PART) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_owned();
        let bytes = field.bytes().await?;
        return Ok(Some(UploadRequest::new(file_name, content_type, bytes.to_vec())));
    }
    Ok(None)
}
