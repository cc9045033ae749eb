//! Shared world state for custom field BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use rstest::fixture;
use trellis::attachment::{adapters::memory::InMemoryBlobStore, domain::AttachmentPolicy};
use trellis::context::RequestContext;
use trellis::field::domain::FieldDefinition;
use trellis::http::{AppState, Repositories};
use trellis::list::{domain::TaskList, services::CascadeDeletion};
use trellis::task::{domain::TaskView, services::TaskServiceError};
use trellis::workspace::services::BootstrapRequest;

/// Scenario world for custom field behaviour tests.
pub struct CustomFieldWorld {
    pub state: AppState,
    pub repositories: Repositories,
    pub ctx: Option<RequestContext>,
    pub list: Option<TaskList>,
    pub fields: HashMap<String, FieldDefinition>,
    pub last_task_result: Option<Result<TaskView, TaskServiceError>>,
    pub last_deletion: Option<CascadeDeletion>,
}

impl CustomFieldWorld {
    /// Creates a world over fresh in-memory repositories.
    #[must_use]
    pub fn new() -> Self {
        let repositories = Repositories::in_memory();
        let state = AppState::new(
            repositories.clone(),
            Arc::new(InMemoryBlobStore::new()),
            AttachmentPolicy::default(),
            BootstrapRequest::new("owner@example.com", "Owner", "My Workspace"),
        );
        Self {
            state,
            repositories,
            ctx: None,
            list: None,
            fields: HashMap::new(),
            last_task_result: None,
            last_deletion: None,
        }
    }

    /// Returns the bootstrap context, creating it on first use.
    pub fn context(&mut self) -> Result<RequestContext, eyre::Report> {
        if let Some(ctx) = self.ctx {
            return Ok(ctx);
        }
        let ctx = run_async(self.state.context())
            .map_err(|err| eyre::eyre!("bootstrap failed: {err}"))?;
        self.ctx = Some(ctx);
        Ok(ctx)
    }

    /// Returns the list created by a previous step.
    pub fn list(&self) -> Result<&TaskList, eyre::Report> {
        self.list
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing list in scenario world"))
    }

    /// Returns a field created by a previous step.
    pub fn field(&self, name: &str) -> Result<&FieldDefinition, eyre::Report> {
        self.fields
            .get(name)
            .ok_or_else(|| eyre::eyre!("missing field '{name}' in scenario world"))
    }
}

impl Default for CustomFieldWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CustomFieldWorld {
    CustomFieldWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
