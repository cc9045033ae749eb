//! Tests for the response envelope and error classification.

use crate::api::{ApiError, ApiErrorKind, ApiResponse, INTERNAL_ERROR_MESSAGE};
use crate::field::{domain::FieldDomainError, services::FieldServiceError};
use crate::list::{domain::ListId, services::ListServiceError};
use crate::task::{
    domain::{TaskDomainError, TaskId, TaskQueryError},
    ports::TaskRepositoryError,
    services::TaskServiceError,
};
use axum::{http::StatusCode, response::IntoResponse};
use rstest::rstest;
use serde_json::json;
use tracing_test::traced_test;

#[rstest]
#[case(ApiErrorKind::Validation, StatusCode::BAD_REQUEST, "validation")]
#[case(ApiErrorKind::NotFound, StatusCode::NOT_FOUND, "not_found")]
#[case(ApiErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, "internal")]
fn kinds_map_to_statuses(
    #[case] kind: ApiErrorKind,
    #[case] status: StatusCode,
    #[case] token: &str,
) {
    assert_eq!(kind.status_code(), status);
    assert_eq!(kind.to_string(), token);
}

#[rstest]
fn success_envelope_omits_absent_members() {
    let body = ApiResponse::ok(json!({"id": 1})).with_message("created");

    let value = serde_json::to_value(&body).expect("serialization should succeed");

    assert_eq!(
        value,
        json!({"success": true, "data": {"id": 1}, "message": "created"})
    );
}

#[rstest]
fn failure_envelope_carries_error_text() {
    let value = serde_json::to_value(ApiResponse::<()>::failure("list not found"))
        .expect("serialization should succeed");

    assert_eq!(value, json!({"success": false, "error": "list not found"}));
}

#[rstest]
#[case(TaskServiceError::Domain(TaskDomainError::EmptyTaskName), ApiErrorKind::Validation)]
#[case(
    TaskServiceError::Query(TaskQueryError::UnknownSortField("colour".to_owned())),
    ApiErrorKind::Validation
)]
#[case(TaskServiceError::InvalidDate("soon".to_owned()), ApiErrorKind::Validation)]
#[case(TaskServiceError::ListNotFound(ListId::new()), ApiErrorKind::NotFound)]
#[case(TaskServiceError::NotFound(TaskId::new()), ApiErrorKind::NotFound)]
#[case(
    TaskServiceError::Repository(TaskRepositoryError::NotFound(TaskId::new())),
    ApiErrorKind::NotFound
)]
fn task_errors_are_classified(#[case] err: TaskServiceError, #[case] expected: ApiErrorKind) {
    let api: ApiError = err.into();

    assert_eq!(api.kind(), expected);
}

#[rstest]
fn validation_message_is_passed_through() {
    let api: ApiError = FieldServiceError::Domain(FieldDomainError::EmptyFieldName).into();

    assert_eq!(api.kind(), ApiErrorKind::Validation);
    assert_eq!(api.message(), "field name is required");
}

#[rstest]
fn not_found_message_names_the_entity() {
    let list_id = ListId::new();
    let api: ApiError = ListServiceError::NotFound(list_id).into();

    assert_eq!(api.kind(), ApiErrorKind::NotFound);
    assert_eq!(api.message(), format!("list not found: {list_id}"));
}

#[rstest]
#[traced_test]
fn internal_errors_are_logged_and_masked() {
    let cause = TaskRepositoryError::persistence(std::io::Error::other("connection reset"));

    let api: ApiError = TaskServiceError::Repository(cause).into();

    assert_eq!(api.kind(), ApiErrorKind::Internal);
    assert_eq!(api.message(), INTERNAL_ERROR_MESSAGE);
    assert!(logs_contain("connection reset"));
}

#[rstest]
fn error_renders_envelope_with_status() {
    let response = ApiError::not_found("task not found").into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
