//! Domain model for workspaces and users.

mod error;
mod ids;
mod user;
mod workspace;

pub use error::WorkspaceDomainError;
pub use ids::{UserId, WorkspaceId};
pub use user::{EmailAddress, User, UserSummary};
pub use workspace::{PermissionLevel, Workspace, WorkspaceMember, WorkspaceSettings};
