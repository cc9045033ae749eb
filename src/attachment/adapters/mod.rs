//! Adapter implementations of the attachment ports.

pub mod filesystem;
pub mod memory;
pub mod postgres;

use camino::Utf8Path;
use uuid::Uuid;

/// Builds `<folder>/<uuid>[.<ext>]` for a new object.
pub(crate) fn object_key(folder: &str, original_name: &str) -> String {
    let stem = Uuid::new_v4();
    let folder_path = folder.trim_matches('/');
    Utf8Path::new(original_name)
        .extension()
        .map_or_else(
            || format!("{folder_path}/{stem}"),
            |extension| format!("{folder_path}/{stem}.{}", extension.to_ascii_lowercase()),
        )
}
