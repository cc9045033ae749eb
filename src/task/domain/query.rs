//! Filtering and sorting of a list's tasks.

use super::{ParsePriorityError, ParseTaskStatusError, Priority, Task, TaskStatus};
use crate::field::domain::parse_date;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use thiserror::Error;

/// Raw query-string parameters accepted by the task query operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryParams {
    /// Comma-separated status tokens ("any of").
    #[serde(default)]
    pub status: Option<String>,
    /// Comma-separated priority tokens ("any of").
    #[serde(default)]
    pub priority: Option<String>,
    /// Free-text search.
    #[serde(default)]
    pub search: Option<String>,
    /// Inclusive lower due date bound.
    #[serde(default)]
    pub due_date_from: Option<String>,
    /// Inclusive upper due date bound.
    #[serde(default)]
    pub due_date_to: Option<String>,
    /// Sort field token.
    #[serde(default)]
    pub sort_field: Option<String>,
    /// `asc` or `desc`.
    #[serde(default)]
    pub sort_order: Option<String>,
}

/// Malformed query parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskQueryError {
    /// A status filter token is unknown.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    /// A priority filter token is unknown.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
    /// A due date bound does not parse.
    #[error("invalid due date bound: {0}")]
    InvalidDate(String),
    /// The sort field is not sortable.
    #[error("unsupported sort field: {0}")]
    UnknownSortField(String),
    /// The sort order is neither `asc` nor `desc`.
    #[error("unsupported sort order: {0}")]
    UnknownSortOrder(String),
}

/// Task attribute a query can sort on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Task name, case-insensitive.
    Name,
    /// Status in workflow order.
    Status,
    /// Priority from urgent to low.
    Priority,
    /// Due date; tasks without one sort first.
    DueDate,
    /// Creation time.
    CreatedAt,
    /// Last update time.
    UpdatedAt,
    /// Manual position.
    #[default]
    Order,
}

impl TryFrom<&str> for SortField {
    type Error = TaskQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "dueDate" => Ok(Self::DueDate),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "order" => Ok(Self::Order),
            _ => Err(TaskQueryError::UnknownSortField(value.to_owned())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl TryFrom<&str> for SortOrder {
    type Error = TaskQueryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(TaskQueryError::UnknownSortOrder(value.to_owned())),
        }
    }
}

/// Parsed task filter. Empty member sets impose no constraint; a search made
/// only of stop words matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    statuses: Vec<TaskStatus>,
    priorities: Vec<Priority>,
    search_tokens: Option<BTreeSet<String>>,
    due_from: Option<DateTime<Utc>>,
    due_to: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Restricts to any of `statuses`.
    #[must_use]
    pub fn with_statuses(mut self, statuses: Vec<TaskStatus>) -> Self {
        self.statuses = statuses;
        self
    }

    /// Restricts to any of `priorities`.
    #[must_use]
    pub fn with_priorities(mut self, priorities: Vec<Priority>) -> Self {
        self.priorities = priorities;
        self
    }

    /// Restricts to tasks sharing a word with `search`.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search_tokens = Some(tokenize(search));
        self
    }

    /// Restricts to tasks due within the inclusive range.
    #[must_use]
    pub const fn with_due_range(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.due_from = from;
        self.due_to = to;
        self
    }

    /// Returns the accepted statuses; empty means any.
    #[must_use]
    pub fn statuses(&self) -> &[TaskStatus] {
        &self.statuses
    }

    /// Returns `true` when `task` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_status(task)
            && self.matches_priority(task)
            && self.matches_due_date(task)
            && self.matches_search(task)
    }

    fn matches_status(&self, task: &Task) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&task.status())
    }

    fn matches_priority(&self, task: &Task) -> bool {
        self.priorities.is_empty() || self.priorities.contains(&task.priority())
    }

    fn matches_due_date(&self, task: &Task) -> bool {
        if self.due_from.is_none() && self.due_to.is_none() {
            return true;
        }
        let Some(due) = task.due_date() else {
            return false;
        };
        self.due_from.is_none_or(|from| due >= from) && self.due_to.is_none_or(|to| due <= to)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let Some(tokens) = &self.search_tokens else {
            return true;
        };
        let mut haystack = tokenize(task.name());
        if let Some(description) = task.description() {
            haystack.extend(tokenize(description));
        }
        !tokens.is_disjoint(&haystack)
    }
}

/// Sort field and direction with a `createdAt` ascending tie-break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSort {
    /// Primary sort field.
    pub field: SortField,
    /// Primary sort direction.
    pub order: SortOrder,
}

impl TaskSort {
    /// Compares two tasks under this sort.
    #[must_use]
    pub fn compare(&self, left: &Task, right: &Task) -> Ordering {
        let primary = match self.field {
            SortField::Name => left
                .name()
                .to_lowercase()
                .cmp(&right.name().to_lowercase())
                .then_with(|| left.name().cmp(right.name())),
            SortField::Status => left.status().rank().cmp(&right.status().rank()),
            SortField::Priority => left.priority().rank().cmp(&right.priority().rank()),
            SortField::DueDate => left.due_date().cmp(&right.due_date()),
            SortField::CreatedAt => left.created_at().cmp(&right.created_at()),
            SortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            SortField::Order => left.order().cmp(&right.order()),
        };
        let directed = match self.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        let secondary = if self.field == SortField::CreatedAt {
            Ordering::Equal
        } else {
            left.created_at().cmp(&right.created_at())
        };
        directed
            .then(secondary)
            .then_with(|| left.id().cmp(&right.id()))
    }
}

/// A parsed filter plus sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Filter constraints.
    pub filter: TaskFilter,
    /// Sort order.
    pub sort: TaskSort,
}

impl TaskQuery {
    /// Parses raw query parameters. Blank parameters are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueryError`] for unknown tokens or malformed dates.
    pub fn from_params(params: &TaskQueryParams) -> Result<Self, TaskQueryError> {
        let statuses = split_tokens(params.status.as_deref())
            .map(TaskStatus::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let priorities = split_tokens(params.priority.as_deref())
            .map(Priority::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let due_from = parse_bound(params.due_date_from.as_deref())?;
        let due_to = parse_bound(params.due_date_to.as_deref())?;

        let mut filter = TaskFilter::default()
            .with_statuses(statuses)
            .with_priorities(priorities)
            .with_due_range(due_from, due_to);
        if let Some(search) = non_blank(params.search.as_deref()) {
            filter = filter.with_search(search);
        }

        let sort = TaskSort {
            field: non_blank(params.sort_field.as_deref())
                .map(SortField::try_from)
                .transpose()?
                .unwrap_or_default(),
            order: non_blank(params.sort_order.as_deref())
                .map(SortOrder::try_from)
                .transpose()?
                .unwrap_or_default(),
        };
        Ok(Self { filter, sort })
    }

    /// Filters and sorts `tasks`.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let mut matching: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.filter.matches(task))
            .collect();
        matching.sort_by(|left, right| self.sort.compare(left, right));
        matching
    }
}

/// English words ignored by search, sorted for binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "after", "all", "an", "and", "any", "are", "as", "at", "be", "been", "but",
    "by", "can", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her", "his",
    "i", "if", "in", "into", "is", "it", "its", "me", "my", "no", "not", "of", "on", "or",
    "our", "she", "so", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "to", "too", "up", "us", "was", "we", "were", "what", "when",
    "which", "who", "will", "with", "you", "your",
];

/// Splits text into lower-cased alphanumeric words, dropping English stop
/// words.
#[must_use]
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|character: char| !character.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .filter(|word| STOP_WORDS.binary_search(&word.as_str()).is_err())
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn split_tokens(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_bound(value: Option<&str>) -> Result<Option<DateTime<Utc>>, TaskQueryError> {
    non_blank(value)
        .map(|text| parse_date(text).ok_or_else(|| TaskQueryError::InvalidDate(text.to_owned())))
        .transpose()
}
