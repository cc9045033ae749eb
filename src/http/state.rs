//! Shared handler state and its construction from configuration.

use crate::api::ApiError;
use crate::attachment::{
    adapters::{
        filesystem::FilesystemBlobStore,
        memory::{InMemoryAttachmentRepository, InMemoryBlobStore},
        postgres::PostgresAttachmentRepository,
    },
    domain::AttachmentPolicy,
    ports::{AttachmentRepository, BlobStore, BlobStoreError},
    services::AttachmentService,
};
use crate::config::{BlobBackend, BlobConfig, StorageBackend, StorageConfig, TrellisConfig};
use crate::context::RequestContext;
use crate::field::{
    adapters::{
        memory::InMemoryFieldDefinitionRepository, postgres::PostgresFieldDefinitionRepository,
    },
    ports::FieldDefinitionRepository,
    services::FieldDefinitionService,
};
use crate::list::{
    adapters::{memory::InMemoryListRepository, postgres::PostgresListRepository},
    ports::ListRepository,
    services::ListService,
};
use crate::postgres::{PgPool, build_pool};
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskService,
};
use crate::workspace::{
    adapters::{
        memory::{InMemoryUserRepository, InMemoryWorkspaceRepository},
        postgres::{PostgresUserRepository, PostgresWorkspaceRepository},
    },
    ports::{UserRepository, WorkspaceRepository},
    services::{BootstrapRequest, Bootstrapped, WorkspaceService},
};
use diesel::r2d2::PoolError;
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Allowance for multipart boundaries and headers on top of the file size.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Workspace service over trait-object repositories.
pub type Workspaces = WorkspaceService<dyn WorkspaceRepository, dyn UserRepository, DefaultClock>;

/// List service over trait-object repositories.
pub type Lists = ListService<
    dyn ListRepository,
    dyn TaskRepository,
    dyn FieldDefinitionRepository,
    DefaultClock,
>;

/// Field definition service over trait-object repositories.
pub type Fields =
    FieldDefinitionService<dyn FieldDefinitionRepository, dyn ListRepository, DefaultClock>;

/// Task service over trait-object repositories.
pub type Tasks = TaskService<
    dyn TaskRepository,
    dyn FieldDefinitionRepository,
    dyn ListRepository,
    dyn UserRepository,
    DefaultClock,
>;

/// Attachment service over trait-object collaborators.
pub type Attachments =
    AttachmentService<dyn AttachmentRepository, dyn BlobStore, dyn TaskRepository, DefaultClock>;

/// Errors raised while wiring the application from configuration.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The Postgres backend was selected without a connection string.
    #[error("storage.database_url is required for the postgres backend")]
    MissingDatabaseUrl,
    /// The connection pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),
    /// The blob store could not be opened.
    #[error("failed to open blob store: {0}")]
    Blobs(#[from] BlobStoreError),
}

/// One repository per aggregate, sharing a backend.
#[derive(Clone)]
pub struct Repositories {
    /// Users.
    pub users: Arc<dyn UserRepository>,
    /// Workspaces.
    pub workspaces: Arc<dyn WorkspaceRepository>,
    /// Lists.
    pub lists: Arc<dyn ListRepository>,
    /// Field definitions.
    pub fields: Arc<dyn FieldDefinitionRepository>,
    /// Tasks.
    pub tasks: Arc<dyn TaskRepository>,
    /// Attachment metadata.
    pub attachments: Arc<dyn AttachmentRepository>,
}

impl Repositories {
    /// Process-local repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            workspaces: Arc::new(InMemoryWorkspaceRepository::new()),
            lists: Arc::new(InMemoryListRepository::new()),
            fields: Arc::new(InMemoryFieldDefinitionRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            attachments: Arc::new(InMemoryAttachmentRepository::new()),
        }
    }

    /// Repositories sharing one `PostgreSQL` pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            workspaces: Arc::new(PostgresWorkspaceRepository::new(pool.clone())),
            lists: Arc::new(PostgresListRepository::new(pool.clone())),
            fields: Arc::new(PostgresFieldDefinitionRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            attachments: Arc::new(PostgresAttachmentRepository::new(pool.clone())),
        }
    }

    /// Selects the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when the Postgres backend is selected without
    /// a URL or the pool cannot connect.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StartupError> {
        match config.backend {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or(StartupError::MissingDatabaseUrl)?;
                let pool = build_pool(url, config.pool_size)?;
                Ok(Self::postgres(&pool))
            }
        }
    }
}

/// Opens the blob store named in `config`.
///
/// # Errors
///
/// Returns [`StartupError::Blobs`] when the filesystem root cannot be opened.
pub fn blob_store(config: &BlobConfig) -> Result<Arc<dyn BlobStore>, StartupError> {
    match config.backend {
        BlobBackend::Memory => Ok(Arc::new(InMemoryBlobStore::new())),
        BlobBackend::Filesystem => Ok(Arc::new(FilesystemBlobStore::open(
            &config.root,
            config.public_base_url.clone(),
        )?)),
    }
}

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Workspace bootstrap and settings.
    pub workspaces: Arc<Workspaces>,
    /// Lists and cascade delete.
    pub lists: Arc<Lists>,
    /// Field definitions.
    pub fields: Arc<Fields>,
    /// Task records.
    pub tasks: Arc<Tasks>,
    /// Task attachments.
    pub attachments: Arc<Attachments>,
    bootstrap: Arc<BootstrapRequest>,
    body_limit: usize,
}

impl AppState {
    /// Builds every service over the given collaborators.
    #[must_use]
    pub fn new(
        repositories: Repositories,
        blobs: Arc<dyn BlobStore>,
        policy: AttachmentPolicy,
        bootstrap: BootstrapRequest,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        let body_limit = usize::try_from(policy.max_file_size)
            .unwrap_or(usize::MAX)
            .saturating_add(MULTIPART_OVERHEAD);
        let Repositories {
            users,
            workspaces,
            lists,
            fields,
            tasks,
            attachments,
        } = repositories;
        Self {
            workspaces: Arc::new(WorkspaceService::new(
                workspaces,
                Arc::clone(&users),
                Arc::clone(&clock),
            )),
            lists: Arc::new(ListService::new(
                Arc::clone(&lists),
                Arc::clone(&tasks),
                Arc::clone(&fields),
                Arc::clone(&clock),
            )),
            fields: Arc::new(FieldDefinitionService::new(
                Arc::clone(&fields),
                Arc::clone(&lists),
                Arc::clone(&clock),
            )),
            tasks: Arc::new(TaskService::new(
                Arc::clone(&tasks),
                fields,
                lists,
                users,
                Arc::clone(&clock),
            )),
            attachments: Arc::new(
                AttachmentService::new(attachments, blobs, tasks, clock).with_policy(policy),
            ),
            bootstrap: Arc::new(bootstrap),
            body_limit,
        }
    }

    /// Largest accepted request body: the upload limit plus multipart framing.
    #[must_use]
    pub const fn body_limit(&self) -> usize {
        self.body_limit
    }

    /// Wires repositories and the blob store from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when a backend cannot be opened.
    pub fn from_config(config: &TrellisConfig) -> Result<Self, StartupError> {
        let repositories = Repositories::from_config(&config.storage)?;
        let blobs = blob_store(&config.blobs)?;
        info!(
            storage = ?config.storage.backend,
            blobs = ?config.blobs.backend,
            "wired application state"
        );
        Ok(Self::new(
            repositories,
            blobs,
            config.attachments.clone(),
            config.bootstrap.request(),
        ))
    }

    /// Returns the bootstrap user and workspace, creating them on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when bootstrapping fails.
    pub async fn bootstrapped(&self) -> Result<Bootstrapped, ApiError> {
        Ok(self.workspaces.get_or_create(&self.bootstrap).await?)
    }

    /// Resolves the caller's workspace and user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when bootstrapping fails.
    pub async fn context(&self) -> Result<RequestContext, ApiError> {
        Ok(self.bootstrapped().await?.context())
    }
}
