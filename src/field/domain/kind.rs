//! The closed registry of custom field kinds.

use super::FieldDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a custom field; decides the shape of every stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// A number, optionally bounded by `settings.min`/`settings.max`.
    Number,
    /// A calendar date or timestamp.
    Date,
    /// A boolean flag.
    Checkbox,
    /// An absolute URL.
    Url,
    /// One token from the field's options.
    Select,
    /// A set of tokens from the field's options.
    MultiSelect,
    /// One task priority token.
    Priority,
    /// One task status token.
    Status,
}

/// Underlying shape a value of some [`FieldKind`] must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A JSON string.
    Text,
    /// A JSON number.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A string holding an ISO 8601 date or RFC 3339 timestamp.
    Date,
    /// A string holding an absolute URL.
    Url,
    /// A string equal to one option value.
    OptionToken,
    /// An array of strings, each equal to one option value.
    OptionTokenSet,
    /// A string holding a priority token.
    PriorityToken,
    /// A string holding a status token.
    StatusToken,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::Text => "a string",
            Self::Number => "a number",
            Self::Boolean => "a boolean",
            Self::Date => "an ISO 8601 date",
            Self::Url => "an absolute URL",
            Self::OptionToken => "one option value",
            Self::OptionTokenSet => "a list of option values",
            Self::PriorityToken => "a priority token",
            Self::StatusToken => "a status token",
        };
        f.write_str(description)
    }
}

impl FieldKind {
    /// Every registered kind.
    pub const ALL: [Self; 9] = [
        Self::Text,
        Self::Number,
        Self::Date,
        Self::Checkbox,
        Self::Url,
        Self::Select,
        Self::MultiSelect,
        Self::Priority,
        Self::Status,
    ];

    /// Returns the canonical wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Url => "url",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }

    /// Returns the value shape stored for this kind.
    #[must_use]
    pub const fn value_shape(self) -> ValueShape {
        match self {
            Self::Text => ValueShape::Text,
            Self::Number => ValueShape::Number,
            Self::Date => ValueShape::Date,
            Self::Checkbox => ValueShape::Boolean,
            Self::Url => ValueShape::Url,
            Self::Select => ValueShape::OptionToken,
            Self::MultiSelect => ValueShape::OptionTokenSet,
            Self::Priority => ValueShape::PriorityToken,
            Self::Status => ValueShape::StatusToken,
        }
    }

    /// Returns `true` when definitions of this kind need a non-empty option set.
    #[must_use]
    pub const fn requires_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

impl TryFrom<&str> for FieldKind {
    type Error = FieldDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| FieldDomainError::UnknownFieldKind(value.to_owned()))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
