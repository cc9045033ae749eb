//! In-memory workspace and user adapters.

mod user;
mod workspace;

pub use user::InMemoryUserRepository;
pub use workspace::InMemoryWorkspaceRepository;
