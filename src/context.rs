//! Caller identity passed explicitly to every scoped operation.

use crate::workspace::domain::{UserId, WorkspaceId};

/// Workspace and user on whose behalf an operation runs.
///
/// Services scope lookups to `workspace_id` and stamp `user_id` into
/// creator, updater and uploader references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext {
    /// Workspace every lookup is scoped to.
    pub workspace_id: WorkspaceId,
    /// Acting user.
    pub user_id: UserId,
}

impl RequestContext {
    /// Creates a request context.
    #[must_use]
    pub const fn new(workspace_id: WorkspaceId, user_id: UserId) -> Self {
        Self {
            workspace_id,
            user_id,
        }
    }
}
