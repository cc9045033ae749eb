//! Outcome types for cascading list deletion.
//!
//! A list delete removes the list's tasks, then its field definitions, then
//! the list itself. The steps are independent bulk deletes with no rollback,
//! so a failure reports how far the cascade got.

use crate::list::domain::ListId;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// One step of the cascade, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    /// Bulk delete of the list's tasks.
    Tasks,
    /// Bulk delete of the list's field definitions.
    FieldDefinitions,
    /// Delete of the list record.
    List,
}

impl fmt::Display for CascadeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Tasks => "tasks",
            Self::FieldDefinitions => "field definitions",
            Self::List => "list",
        };
        f.write_str(label)
    }
}

/// Steps completed before a cascade stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeProgress {
    /// Tasks removed, when that step completed.
    pub tasks_deleted: Option<u64>,
    /// Field definitions removed, when that step completed.
    pub fields_deleted: Option<u64>,
}

/// A completed cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeDeletion {
    /// The deleted list.
    pub list_id: ListId,
    /// Tasks removed with it.
    pub tasks_deleted: u64,
    /// Field definitions removed with it.
    pub fields_deleted: u64,
}

/// A cascade that stopped part-way.
#[derive(Debug, Clone, Error)]
#[error("deleting list {list_id} stopped at the {failed_step} step: {source}")]
pub struct CascadeError {
    /// The list being deleted.
    pub list_id: ListId,
    /// Steps completed before the failure.
    pub progress: CascadeProgress,
    /// The step that failed.
    pub failed_step: CascadeStep,
    /// Underlying failure.
    #[source]
    pub source: Arc<dyn std::error::Error + Send + Sync>,
}

impl CascadeError {
    pub(crate) fn new(
        list_id: ListId,
        progress: CascadeProgress,
        failed_step: CascadeStep,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            list_id,
            progress,
            failed_step,
            source: Arc::new(source),
        }
    }
}
