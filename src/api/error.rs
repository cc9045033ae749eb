//! Error classification for the HTTP boundary.

use super::ApiResponse;
use crate::attachment::services::AttachmentServiceError;
use crate::field::{ports::FieldRepositoryError, services::FieldServiceError};
use crate::list::{ports::ListRepositoryError, services::ListServiceError};
use crate::task::{ports::TaskRepositoryError, services::TaskServiceError};
use crate::workspace::services::WorkspaceServiceError;
use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// Message returned in place of internal failure details.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// How a failure is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// Malformed or disallowed input.
    Validation,
    /// A referenced entity does not exist in the caller's scope.
    NotFound,
    /// A store or collaborator failed.
    Internal,
}

impl ApiErrorKind {
    /// HTTP status for this kind.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        })
    }
}

/// A classified failure ready to be rendered as an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
}

impl ApiError {
    /// A validation failure with a caller-facing message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            message: message.into(),
        }
    }

    /// A not-found failure with a caller-facing message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            message: message.into(),
        }
    }

    /// Logs `cause` and returns a generic internal failure.
    #[must_use]
    pub fn internal(cause: &(dyn StdError + 'static)) -> Self {
        error!(error = %cause, source = ?cause.source(), "internal error");
        Self {
            kind: ApiErrorKind::Internal,
            message: INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Failure kind.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    fn from_display(kind: ApiErrorKind, err: &(dyn StdError + 'static)) -> Self {
        match kind {
            ApiErrorKind::Validation => Self::validation(err.to_string()),
            ApiErrorKind::NotFound => Self::not_found(err.to_string()),
            ApiErrorKind::Internal => Self::internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::failure(self.message);
        (self.kind.status_code(), Json(body)).into_response()
    }
}

impl From<WorkspaceServiceError> for ApiError {
    fn from(err: WorkspaceServiceError) -> Self {
        let kind = match &err {
            WorkspaceServiceError::Domain(_) => ApiErrorKind::Validation,
            WorkspaceServiceError::NotFound(_) => ApiErrorKind::NotFound,
            WorkspaceServiceError::Repository(_) => ApiErrorKind::Internal,
        };
        Self::from_display(kind, &err)
    }
}

impl From<ListServiceError> for ApiError {
    fn from(err: ListServiceError) -> Self {
        let kind = match &err {
            ListServiceError::Domain(_) => ApiErrorKind::Validation,
            ListServiceError::NotFound(_)
            | ListServiceError::Repository(ListRepositoryError::NotFound(_)) => {
                ApiErrorKind::NotFound
            }
            ListServiceError::Repository(_) | ListServiceError::Cascade(_) => {
                ApiErrorKind::Internal
            }
        };
        Self::from_display(kind, &err)
    }
}

impl From<FieldServiceError> for ApiError {
    fn from(err: FieldServiceError) -> Self {
        let kind = match &err {
            FieldServiceError::Domain(_) => ApiErrorKind::Validation,
            FieldServiceError::ListNotFound(_)
            | FieldServiceError::NotFound(_)
            | FieldServiceError::Repository(FieldRepositoryError::NotFound(_)) => {
                ApiErrorKind::NotFound
            }
            FieldServiceError::Repository(_) | FieldServiceError::Lists(_) => {
                ApiErrorKind::Internal
            }
        };
        Self::from_display(kind, &err)
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        let kind = match &err {
            TaskServiceError::Domain(_)
            | TaskServiceError::Status(_)
            | TaskServiceError::Priority(_)
            | TaskServiceError::InvalidDate(_)
            | TaskServiceError::Query(_) => ApiErrorKind::Validation,
            TaskServiceError::ListNotFound(_)
            | TaskServiceError::NotFound(_)
            | TaskServiceError::Repository(TaskRepositoryError::NotFound(_)) => {
                ApiErrorKind::NotFound
            }
            TaskServiceError::Repository(_)
            | TaskServiceError::Fields(_)
            | TaskServiceError::Lists(_)
            | TaskServiceError::Users(_) => ApiErrorKind::Internal,
        };
        Self::from_display(kind, &err)
    }
}

impl From<AttachmentServiceError> for ApiError {
    fn from(err: AttachmentServiceError) -> Self {
        let kind = match &err {
            AttachmentServiceError::Domain(_) => ApiErrorKind::Validation,
            AttachmentServiceError::TaskNotFound(_) | AttachmentServiceError::NotFound(_) => {
                ApiErrorKind::NotFound
            }
            AttachmentServiceError::Repository(_)
            | AttachmentServiceError::Blob(_)
            | AttachmentServiceError::Tasks(_) => ApiErrorKind::Internal,
        };
        Self::from_display(kind, &err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::validation(err.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}
