//! Serde helpers for partial-update payloads.
//!
//! Partial updates distinguish an absent key from an explicit `null`. Fields
//! declared as `Option<Option<T>>` with `#[serde(default, deserialize_with =
//! "deserialize_some")]` read as `None` when the key is missing, `Some(None)`
//! for `null` and `Some(Some(value))` otherwise.

use serde::{Deserialize, Deserializer};

/// Deserializes a present key into `Some`, keeping `null` inside the value.
///
/// # Errors
///
/// Returns the deserializer error when the value does not match `T`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
