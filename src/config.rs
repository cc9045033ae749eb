//! Layered runtime configuration.
//!
//! Values are resolved from built-in defaults, then an optional TOML file,
//! then `TRELLIS_`-prefixed environment variables. Nested keys use a double
//! underscore, so `TRELLIS_STORAGE__DATABASE_URL` sets `storage.database_url`.

use crate::attachment::domain::AttachmentPolicy;
use crate::workspace::services::BootstrapRequest;
use camino::Utf8PathBuf;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "trellis.toml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "TRELLIS_CONFIG";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TRELLIS_";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Record storage backend.
    pub storage: StorageConfig,
    /// Attachment content backend.
    pub blobs: BlobConfig,
    /// Upload limits.
    pub attachments: AttachmentPolicy,
    /// Identity created on first access, plus the default log filter.
    pub bootstrap: BootstrapConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind.
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

/// Which backend stores lists, fields, tasks and attachment metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps; data is lost on exit.
    #[default]
    Memory,
    /// `PostgreSQL` through Diesel.
    Postgres,
}

/// Record storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Selected backend.
    pub backend: StorageBackend,
    /// Connection string, required for the Postgres backend.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: None,
            pool_size: 8,
        }
    }
}

/// Which backend stores attachment content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobBackend {
    /// Process-local map.
    #[default]
    Memory,
    /// A local directory.
    Filesystem,
}

/// Attachment content storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    /// Selected backend.
    pub backend: BlobBackend,
    /// Root directory for the filesystem backend.
    pub root: Utf8PathBuf,
    /// Base URL prefixed to object identifiers in download links.
    pub public_base_url: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            backend: BlobBackend::Memory,
            root: Utf8PathBuf::from("data/attachments"),
            public_base_url: "http://127.0.0.1:3000/files".to_owned(),
        }
    }
}

/// Default identity and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Name of the workspace created on first access.
    pub workspace_name: String,
    /// Description of that workspace.
    pub workspace_description: Option<String>,
    /// Email of the bootstrap user.
    pub user_email: String,
    /// Display name of the bootstrap user.
    pub user_name: String,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            workspace_name: "My Workspace".to_owned(),
            workspace_description: None,
            user_email: "owner@example.com".to_owned(),
            user_name: "Workspace Owner".to_owned(),
            log_filter: "info".to_owned(),
        }
    }
}

impl BootstrapConfig {
    /// Builds the workspace bootstrap request.
    #[must_use]
    pub fn request(&self) -> BootstrapRequest {
        let request = BootstrapRequest::new(
            &self.user_email,
            &self.user_name,
            &self.workspace_name,
        );
        match &self.workspace_description {
            Some(description) => request.with_workspace_description(description),
            None => request,
        }
    }
}

impl TrellisConfig {
    /// Builds the layered provider without extracting it.
    ///
    /// The file layer reads `$TRELLIS_CONFIG` when set and `trellis.toml`
    /// otherwise; a missing file is skipped.
    #[must_use]
    pub fn figment() -> Figment {
        let path = std::env::var(CONFIG_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_owned());
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
    }

    /// Resolves the configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns [`figment::Error`] when a layer holds a value of the wrong
    /// type.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is the library's own error type"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
