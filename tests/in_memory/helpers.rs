//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use rstest::fixture;
use trellis::attachment::{adapters::memory::InMemoryBlobStore, domain::AttachmentPolicy};
use trellis::context::RequestContext;
use trellis::field::{domain::FieldDefinition, services::CreateFieldRequest};
use trellis::http::{AppState, Repositories};
use trellis::list::{domain::TaskList, services::CreateListRequest};
use trellis::workspace::services::BootstrapRequest;

/// Application state over in-memory repositories, acting as the bootstrap
/// user.
pub struct App {
    /// Wired services.
    pub state: AppState,
    /// Direct repository access for assertions.
    pub repositories: Repositories,
    /// Blob content for assertions.
    pub blobs: Arc<InMemoryBlobStore>,
    /// Bootstrap workspace and user.
    pub ctx: RequestContext,
}

impl App {
    /// Creates a list, panicking on failure.
    pub async fn list(&self, name: &str) -> TaskList {
        self.state
            .lists
            .create(&self.ctx, CreateListRequest::new(name))
            .await
            .expect("list creation should succeed")
    }

    /// Creates a field definition, panicking on failure.
    pub async fn field(&self, list: &TaskList, request: CreateFieldRequest) -> FieldDefinition {
        self.state
            .fields
            .create(&self.ctx, list.id(), request)
            .await
            .expect("field creation should succeed")
    }
}

/// Bootstrap identity used by every test.
pub fn bootstrap() -> BootstrapRequest {
    BootstrapRequest::new("owner@example.com", "Owner", "My Workspace")
}

/// Provides bootstrapped application state.
#[fixture]
pub async fn app() -> App {
    let repositories = Repositories::in_memory();
    let blobs = Arc::new(InMemoryBlobStore::new());
    let state = AppState::new(
        repositories.clone(),
        Arc::clone(&blobs) as Arc<dyn trellis::attachment::ports::BlobStore>,
        AttachmentPolicy::default(),
        bootstrap(),
    );
    let ctx = state.context().await.expect("bootstrap should succeed");
    App {
        state,
        repositories,
        blobs,
        ctx,
    }
}
