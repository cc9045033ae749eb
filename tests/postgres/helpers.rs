//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use trellis::attachment::{adapters::memory::InMemoryBlobStore, domain::AttachmentPolicy};
use trellis::context::RequestContext;
use trellis::http::{AppState, Repositories};
use trellis::postgres::build_pool;
use trellis::workspace::services::BootstrapRequest;
use uuid::Uuid;

/// Environment variable holding the server used by these tests.
pub const DATABASE_URL_ENV: &str = "TRELLIS_TEST_DATABASE_URL";

/// Schema migration applied to every test schema.
pub const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2026-01-15-000000_create_trellis_tables/up.sql");

/// Boxed error type for test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A migrated schema, dropped when the value goes out of scope.
pub struct TestSchema {
    base_url: String,
    name: String,
}

impl TestSchema {
    fn create(base_url: &str) -> Result<Self, BoxError> {
        let name = format!("trellis_test_{}", Uuid::new_v4().simple());
        let mut conn = PgConnection::establish(base_url)?;
        conn.batch_execute(&format!(
            "CREATE SCHEMA {name}; SET search_path TO {name}; {CREATE_TABLES_SQL}"
        ))?;
        Ok(Self {
            base_url: base_url.to_owned(),
            name,
        })
    }

    /// Connection string pinning `search_path` to this schema.
    pub fn url(&self) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}options=-c%20search_path%3D{}",
            self.base_url, self.name
        )
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.base_url)
            .map_err(|err| err.to_string())
            .and_then(|mut conn| {
                conn.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name))
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = dropped {
            tracing::warn!(schema = %self.name, error = %err, "failed to drop test schema");
        }
    }
}

/// Application state over Postgres repositories in a private schema.
pub struct PostgresApp {
    /// Wired services.
    pub state: AppState,
    /// Direct repository access for assertions.
    pub repositories: Repositories,
    /// Bootstrap workspace and user.
    pub ctx: RequestContext,
    _schema: TestSchema,
}

/// Builds the application, or `None` when no test database is configured.
///
/// # Errors
///
/// Returns an error when the schema cannot be created or the pool cannot
/// connect.
pub async fn postgres_app() -> Result<Option<PostgresApp>, BoxError> {
    let Ok(base_url) = std::env::var(DATABASE_URL_ENV) else {
        return Ok(None);
    };
    let schema = tokio::task::spawn_blocking(move || TestSchema::create(&base_url)).await??;
    let pool = build_pool(&schema.url(), 2)?;
    let repositories = Repositories::postgres(&pool);
    let state = AppState::new(
        repositories.clone(),
        Arc::new(InMemoryBlobStore::new()),
        AttachmentPolicy::default(),
        BootstrapRequest::new("owner@example.com", "Owner", "My Workspace"),
    );
    let ctx = state.context().await?;
    Ok(Some(PostgresApp {
        state,
        repositories,
        ctx,
        _schema: schema,
    }))
}
