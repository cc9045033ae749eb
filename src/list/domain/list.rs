//! Task list aggregate.

use super::{ListDomainError, ListId};
use crate::workspace::domain::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Display color given to lists created without one.
pub const DEFAULT_LIST_COLOR: &str = "#3b82f6";

/// Display icon given to lists created without one.
pub const DEFAULT_LIST_ICON: &str = "📋";

/// A named bucket of tasks within a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    id: ListId,
    workspace_id: WorkspaceId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    color: String,
    icon: String,
    order: i64,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial list update. Absent members are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPatch {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description; `null` clears it.
    #[serde(default, deserialize_with = "crate::patch::deserialize_some")]
    pub description: Option<Option<String>>,
    /// New display color.
    #[serde(default)]
    pub color: Option<String>,
    /// New display icon.
    #[serde(default)]
    pub icon: Option<String>,
    /// New position.
    #[serde(default)]
    pub order: Option<i64>,
}

impl TaskList {
    /// Creates a list with default color and icon.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::EmptyListName`] when `name` is blank.
    pub fn new(
        name: &str,
        workspace_id: WorkspaceId,
        order: i64,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, ListDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: ListId::new(),
            workspace_id,
            name: normalized_name(name)?,
            description: None,
            color: DEFAULT_LIST_COLOR.to_owned(),
            icon: DEFAULT_LIST_ICON.to_owned(),
            order,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = normalized_description(description);
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the display icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Applies a partial update, leaving the list unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns [`ListDomainError::EmptyListName`] when the patch supplies a
    /// blank name.
    pub fn apply_patch(
        &mut self,
        patch: ListPatch,
        clock: &impl Clock,
    ) -> Result<(), ListDomainError> {
        let name = patch.name.as_deref().map(normalized_name).transpose()?;
        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(description) = patch.description {
            self.description = description.as_deref().and_then(normalized_description);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the list name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the display color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the display icon.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the position among the workspace's lists.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn normalized_name(name: &str) -> Result<String, ListDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ListDomainError::EmptyListName);
    }
    Ok(trimmed.to_owned())
}

fn normalized_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
