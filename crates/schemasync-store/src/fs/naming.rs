//! Object name to file path mapping

use std::path::{Path, PathBuf};

use schemasync_core::model::ObjectKind;

use crate::errors::{invalid_object_name, Result};

/// Extension of definition files
pub const DEFINITION_EXTENSION: &str = "json";

/// Sub-directory holding the definitions of one kind
pub fn kind_dir(root: &Path, kind: ObjectKind) -> PathBuf {
    match kind {
        ObjectKind::Table => root.join("tables"),
        ObjectKind::Function => root.join("functions"),
    }
}

/// Reject names that would escape or confuse the directory layout
///
/// # Errors
///
/// `InvalidInput` for empty names, path separators, `..`, a leading dot,
/// or control characters.
pub fn validate_object_name(kind: ObjectKind, name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else if name.contains("..") {
        Some("name contains '..'")
    } else if name.starts_with('.') {
        Some("name starts with '.'")
    } else if name.chars().any(char::is_control) {
        Some("name contains a control character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(invalid_object_name(kind, name, reason)),
        None => Ok(()),
    }
}

/// Path of the definition file for `name`
///
/// # Errors
///
/// See [`validate_object_name`].
pub fn object_path(root: &Path, kind: ObjectKind, name: &str) -> Result<PathBuf> {
    validate_object_name(kind, name)?;
    Ok(kind_dir(root, kind).join(format!("{}.{}", name, DEFINITION_EXTENSION)))
}
