//! Validation and display of custom field values.
//!
//! Values are stored as raw JSON. Their shape is decided entirely by the
//! owning field definition's kind, settings and options, so every check here
//! takes those three inputs rather than a definition.

use super::{FieldKind, FieldSettings, FieldValueError, SelectOption};
use crate::task::domain::{Priority, TaskStatus};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;

const DISPLAY_DATE_FORMAT: &str = "%b %d, %Y";

/// Parses an RFC 3339 timestamp or a `YYYY-MM-DD` calendar date.
///
/// Calendar dates resolve to midnight UTC.
#[must_use]
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Checks that `value` has the shape `kind` prescribes.
///
/// `null` is accepted for every kind and means "no value".
///
/// # Errors
///
/// Returns a [`FieldValueError`] describing the first mismatch.
pub fn validate_value(
    kind: FieldKind,
    settings: &FieldSettings,
    options: &[SelectOption],
    value: &Value,
) -> Result<(), FieldValueError> {
    if value.is_null() {
        return Ok(());
    }
    let wrong_shape = || FieldValueError::WrongShape {
        kind,
        expected: kind.value_shape(),
    };

    match kind {
        FieldKind::Text => value.as_str().map(drop).ok_or_else(wrong_shape),
        FieldKind::Number => {
            let number = value.as_f64().ok_or_else(wrong_shape)?;
            check_range(number, settings)
        }
        FieldKind::Date => {
            let text = value.as_str().ok_or_else(wrong_shape)?;
            parse_date(text)
                .map(drop)
                .ok_or_else(|| FieldValueError::InvalidDate(text.to_owned()))
        }
        FieldKind::Checkbox => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(wrong_shape())
            }
        }
        FieldKind::Url => {
            let text = value.as_str().ok_or_else(wrong_shape)?;
            url::Url::parse(text.trim())
                .map(drop)
                .map_err(|_| FieldValueError::InvalidUrl(text.to_owned()))
        }
        FieldKind::Select => {
            let token = value.as_str().ok_or_else(wrong_shape)?;
            check_option(token, options)
        }
        FieldKind::MultiSelect => {
            let items = value.as_array().ok_or_else(wrong_shape)?;
            for item in items {
                let token = item.as_str().ok_or_else(wrong_shape)?;
                check_option(token, options)?;
            }
            Ok(())
        }
        FieldKind::Priority => {
            let token = value.as_str().ok_or_else(wrong_shape)?;
            Priority::try_from(token)
                .map(drop)
                .map_err(|err| FieldValueError::UnknownPriority(err.0))
        }
        FieldKind::Status => {
            let token = value.as_str().ok_or_else(wrong_shape)?;
            TaskStatus::try_from(token)
                .map(drop)
                .map_err(|err| FieldValueError::UnknownStatus(err.0))
        }
    }
}

/// Produces a human-readable rendering of `value`.
///
/// Returns `None` for unset values and for values that no longer fit the
/// definition (for example after a type change).
#[must_use]
pub fn render_value(kind: FieldKind, options: &[SelectOption], value: &Value) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match kind {
        FieldKind::Text | FieldKind::Url => value.as_str().map(str::to_owned),
        FieldKind::Number => match value {
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        },
        FieldKind::Date => value
            .as_str()
            .and_then(parse_date)
            .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string()),
        FieldKind::Checkbox => value
            .as_bool()
            .map(|checked| if checked { "✓" } else { "✗" }.to_owned()),
        FieldKind::Select => value
            .as_str()
            .and_then(|token| option_label(token, options))
            .map(str::to_owned),
        FieldKind::MultiSelect => {
            let labels: Vec<&str> = value
                .as_array()?
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|token| option_label(token, options))
                .collect();
            (!labels.is_empty()).then(|| labels.join(", "))
        }
        FieldKind::Priority => value
            .as_str()
            .and_then(|token| Priority::try_from(token).ok())
            .map(|priority| priority.as_str().to_owned()),
        FieldKind::Status => value
            .as_str()
            .and_then(|token| TaskStatus::try_from(token).ok())
            .map(|status| status.as_str().to_owned()),
    }
}

fn check_range(number: f64, settings: &FieldSettings) -> Result<(), FieldValueError> {
    if let Some(min) = settings.min
        && number < min
    {
        return Err(FieldValueError::BelowMinimum { value: number, min });
    }
    if let Some(max) = settings.max
        && number > max
    {
        return Err(FieldValueError::AboveMaximum { value: number, max });
    }
    Ok(())
}

fn check_option(token: &str, options: &[SelectOption]) -> Result<(), FieldValueError> {
    if options.iter().any(|option| option.value == token) {
        Ok(())
    } else {
        Err(FieldValueError::UnknownOption(token.to_owned()))
    }
}

fn option_label<'a>(token: &str, options: &'a [SelectOption]) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.value == token)
        .map(|option| option.label.as_str())
}
