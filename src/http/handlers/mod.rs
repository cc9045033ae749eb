//! Route handlers, one module per resource.
//!
//! Extractor rejections are taken as `Result`s so malformed paths and bodies
//! are reported through the standard envelope.

pub mod attachments;
pub mod fields;
pub mod lists;
pub mod tasks;
pub mod workspace;

use crate::api::{ApiResponse, Reply};
use axum::{Json, http::StatusCode};

/// `200 OK` with `data`.
#[must_use]
pub(crate) const fn ok<T>(data: T) -> Reply<T> {
    (StatusCode::OK, Json(ApiResponse::ok(data)))
}

/// `201 Created` with `data` and a confirmation message.
#[must_use]
pub(crate) fn created<T>(data: T, message: &str) -> Reply<T> {
    (
        StatusCode::CREATED,
        Json(ApiResponse::ok(data).with_message(message)),
    )
}

/// `200 OK` with `data` and a confirmation message.
#[must_use]
pub(crate) fn ok_with_message<T>(data: T, message: &str) -> Reply<T> {
    (
        StatusCode::OK,
        Json(ApiResponse::ok(data).with_message(message)),
    )
}

/// `200 OK` with only a confirmation message.
#[must_use]
pub(crate) fn confirmed(message: &str) -> Reply<()> {
    (StatusCode::OK, Json(ApiResponse::message_only(message)))
}

/// Liveness probe.
pub async fn health() -> Reply<&'static str> {
    ok("ok")
}
