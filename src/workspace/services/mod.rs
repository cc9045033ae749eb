//! Application services for workspace bootstrap and settings.

mod workspace;

pub use workspace::{
    BootstrapRequest, Bootstrapped, UpdateWorkspaceRequest, WorkspaceService,
    WorkspaceServiceError, WorkspaceServiceResult,
};
