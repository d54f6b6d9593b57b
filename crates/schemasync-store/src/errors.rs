//! Error helpers for schemasync-store
//!
//! Every adapter failure is an `ExError` from schemasync-core; these
//! helpers keep op names and kind mapping consistent across adapters.

use schemasync_core::errors::{ExError, ExErrorKind};
use schemasync_core::model::ObjectKind;
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Op name for reading a snapshot file; diagnostics match on it
pub use schemasync_core::diagnostics::rules::OP_READ_SNAPSHOT_FILE;

/// Map an IO error onto the error taxonomy
///
/// `NotFound`, `PermissionDenied` and `TimedOut` keep their meaning; all
/// other IO failures are `Io`.
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    let kind = match err.kind() {
        std::io::ErrorKind::NotFound => ExErrorKind::NotFound,
        std::io::ErrorKind::PermissionDenied => ExErrorKind::Forbidden,
        std::io::ErrorKind::TimedOut => ExErrorKind::Timeout,
        _ => ExErrorKind::Io,
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_message(format!("{}: {}", path.display(), err))
}

/// A snapshot document failed validation
pub fn snapshot_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("parse_snapshot")
        .with_message(reason.to_string())
}

/// The store root does not exist
pub fn database_not_found(root: &Path) -> ExError {
    ExError::new(ExErrorKind::DatabaseNotFound)
        .with_op("open_store")
        .with_message(format!("No schema store at {}", root.display()))
}

/// An object name that cannot be used as a file name
pub fn invalid_object_name(kind: ObjectKind, name: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("object_path")
        .with_object_kind(kind)
        .with_object_name(name)
        .with_message(format!("Invalid object name: {}", reason))
}

/// No object of this kind and name
pub fn object_not_found(op: &str, kind: ObjectKind, name: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op(op.to_string())
        .with_object_kind(kind)
        .with_object_name(name)
        .with_message(format!("No {} named '{}'", kind, name))
}
