//! Append-on-create ordering shared by lists, field definitions and tasks.
//!
//! A new record is positioned one past the current maximum within its scope.
//! The read-then-write is not atomic, so concurrent creates may share a
//! position; positions are display hints, never keys.

/// Returns the position for a record appended after `current_max`.
///
/// An empty scope starts at zero.
#[must_use]
pub const fn next_position(current_max: Option<i64>) -> i64 {
    match current_max {
        Some(max) => max.saturating_add(1),
        None => 0,
    }
}
