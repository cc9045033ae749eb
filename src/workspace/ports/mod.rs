//! Port contracts for workspace and user storage.

pub mod repository;

pub use repository::{
    UserRepository, WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult,
};

#[cfg(test)]
pub use repository::MockWorkspaceRepository;
