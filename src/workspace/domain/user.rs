//! User records and their public summary.

use super::{UserId, WorkspaceDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email address.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::InvalidEmail`] when the address has no
    /// local part or domain around a single `@`.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, WorkspaceDomainError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        let valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !normalized.contains(char::is_whitespace);
        if valid {
            Ok(Self(normalized))
        } else {
            Err(WorkspaceDomainError::InvalidEmail(raw.as_ref().to_owned()))
        }
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person who can own workspaces and be assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceDomainError::EmptyUserName`] when `name` is blank.
    pub fn new(
        email: EmailAddress,
        name: impl AsRef<str>,
        clock: &impl Clock,
    ) -> Result<Self, WorkspaceDomainError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(WorkspaceDomainError::EmptyUserName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: UserId::new(),
            email,
            name: trimmed.to_owned(),
            avatar: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the normalized email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the public projection used when expanding references.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.as_str().to_owned(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Public projection of a user embedded in task responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
