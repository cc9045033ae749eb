//! Trellis: list and task tracking with per-list custom fields.
//!
//! Workspaces own lists, lists own tasks and the custom field definitions
//! that describe extra, user-authored task attributes. Task records store
//! typed values keyed against those definitions, and every read, write and
//! query interprets the values through the live definitions at runtime.
//!
//! # Architecture
//!
//! Trellis follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, blob storage)
//! - **Services**: Orchestration of ports for each inbound operation
//!
//! # Modules
//!
//! - [`field`]: Custom field type registry and field definition store
//! - [`task`]: Task records, custom field values, filtering and sorting
//! - [`list`]: Lists and the cascade delete policy
//! - [`workspace`]: Workspace bootstrap, settings and users
//! - [`attachment`]: Task attachments backed by a blob store
//! - [`api`] and [`http`]: JSON envelope and HTTP routes

pub mod api;
pub mod attachment;
pub mod config;
pub mod context;
pub mod field;
pub mod http;
pub mod list;
pub mod ordering;
pub mod patch;
pub mod postgres;
pub mod task;
pub mod telemetry;
pub mod workspace;
