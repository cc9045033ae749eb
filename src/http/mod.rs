//! HTTP surface: an axum router over the application services.

pub mod handlers;
mod state;

pub use state::{
    AppState, Attachments, Fields, Lists, Repositories, StartupError, Tasks, Workspaces,
    blob_store,
};

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use handlers::{attachments, fields, health, lists, tasks, workspace};

/// Builds the router for every route.
#[must_use]
pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit();
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/workspace",
            get(workspace::get_workspace).put(workspace::update_workspace),
        )
        .route("/api/lists", get(lists::list_lists).post(lists::create_list))
        .route(
            "/api/lists/:list_id",
            get(lists::get_list)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        .route(
            "/api/lists/:list_id/fields",
            get(fields::list_fields).post(fields::create_field),
        )
        .route(
            "/api/lists/:list_id/fields/:field_id",
            get(fields::get_field)
                .put(fields::update_field)
                .delete(fields::delete_field),
        )
        .route(
            "/api/lists/:list_id/tasks",
            get(tasks::query_tasks).post(tasks::create_task),
        )
        .route(
            "/api/lists/:list_id/tasks/:task_id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/api/tasks/:task_id/attachments",
            get(attachments::list_attachments).post(attachments::upload_attachment),
        )
        .route(
            "/api/tasks/:task_id/attachments/:attachment_id",
            get(attachments::get_attachment).delete(attachments::delete_attachment),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
