//! Built-in task status and priority tokens.

use super::{ParsePriorityError, ParseTaskStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    #[serde(rename = "to-do")]
    ToDo,
    /// Work is underway.
    #[serde(rename = "in-progress")]
    InProgress,
    /// Work is awaiting review.
    #[serde(rename = "in-review")]
    InReview,
    /// Work is complete.
    #[serde(rename = "done")]
    Done,
    /// Work cannot proceed.
    #[serde(rename = "blocked")]
    Blocked,
}

impl TaskStatus {
    /// Every status in workflow order.
    pub const ALL: [Self; 5] = [
        Self::ToDo,
        Self::InProgress,
        Self::InReview,
        Self::Done,
        Self::Blocked,
    ];

    /// Returns the canonical wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "to-do",
            Self::InProgress => "in-progress",
            Self::InReview => "in-review",
            Self::Done => "done",
            Self::Blocked => "blocked",
        }
    }

    /// Returns `true` for the status that marks a task complete.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Position in workflow order, used when sorting by status.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ToDo => 0,
            Self::InProgress => 1,
            Self::InReview => 2,
            Self::Done => 3,
            Self::Blocked => 4,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Needs attention immediately.
    Urgent,
    /// Ahead of normal work.
    High,
    /// The default urgency.
    #[default]
    Normal,
    /// Can wait.
    Low,
}

impl Priority {
    /// Every priority from most to least urgent.
    pub const ALL: [Self; 4] = [Self::Urgent, Self::High, Self::Normal, Self::Low];

    /// Returns the canonical wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }

    /// Urgency rank where `urgent` sorts first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Normal => 2,
            Self::Low => 3,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == normalized)
            .ok_or_else(|| ParsePriorityError(value.to_owned()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
