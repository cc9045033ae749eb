//! Workspace aggregate, membership and settings.

use super::{UserId, WorkspaceDomainError, WorkspaceId};
use crate::task::domain::{Priority, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Access level of a workspace member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Created the workspace.
    Owner,
    /// Manages members and settings.
    Admin,
    /// Edits lists and tasks.
    Member,
    /// Read-only access.
    Viewer,
}

/// A user's membership in a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    /// Member user.
    pub user_id: UserId,
    /// Access level.
    pub permission_level: PermissionLevel,
    /// When the user joined.
    pub joined_at: DateTime<Utc>,
}

/// Workspace-wide task defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSettings {
    /// Suggested status for new tasks.
    #[serde(default)]
    pub default_task_status: TaskStatus,
    /// Suggested priority for new tasks.
    #[serde(default)]
    pub default_priority: Priority,
}

/// Top-level tenant container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    owner_id: UserId,
    members: Vec<WorkspaceMember>,
    settings: WorkspaceSettings,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a workspace with `owner_id` as its only member.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyWorkspaceName`] when `name` is
    /// blank.
    pub fn new(
        name: impl AsRef<str>,
        owner_id: UserId,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: WorkspaceId::new(),
            name: normalized_name(name.as_ref())?,
            description: None,
            owner_id,
            members: vec![WorkspaceMember {
                user_id: owner_id,
                permission_level: PermissionLevel::Owner,
                joined_at: timestamp,
            }],
            settings: WorkspaceSettings::default(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl AsRef<str>) -> Self {
        self.description = normalized_description(description.as_ref());
        self
    }

    /// Renames the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyWorkspaceName`] when `name` is
    /// blank; the workspace is left unchanged.
    pub fn rename(&mut self, name: &str, clock: &impl Clock) -> Result<(), WorkspaceDomainError> {
        self.name = normalized_name(name)?;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Replaces or clears the description.
    pub fn set_description(&mut self, description: Option<&str>, clock: &impl Clock) {
        self.description = description.and_then(normalized_description);
        self.updated_at = clock.utc();
    }

    /// Replaces the settings.
    pub fn set_settings(&mut self, settings: WorkspaceSettings, clock: &impl Clock) {
        self.settings = settings;
        self.updated_at = clock.utc();
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn id(&self) -> WorkspaceId {
        self.id
    }

    /// Returns the workspace name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the member list.
    #[must_use]
    pub fn members(&self) -> &[WorkspaceMember] {
        &self.members
    }

    /// Returns the workspace settings.
    #[must_use]
    pub const fn settings(&self) -> WorkspaceSettings {
        self.settings
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

fn normalized_name(name: &str) -> Result<String, WorkspaceDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(WorkspaceDomainError::EmptyWorkspaceName);
    }
    Ok(trimmed.to_owned())
}

fn normalized_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
