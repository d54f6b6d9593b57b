//! Atomic write primitives
//!
//! Uses temp→rename so readers never observe a partial definition file

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::errors::{io_error, Result};

const OP_ATOMIC_WRITE: &str = "atomic_write";

/// Hidden temp file next to `target`; listings skip dot-files
fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple());
    match target.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    }
}

/// Atomically replace `target_path` with `content`
///
/// Creates missing parent directories. On failure the temp file is removed
/// and the previous content of `target_path`, if any, is left intact.
///
/// # Errors
///
/// IO failures mapped by [`io_error`].
pub async fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(OP_ATOMIC_WRITE, parent, e))?;
    }

    let temp_path = temp_path_for(target_path);

    if let Err(e) = tokio::fs::write(&temp_path, content).await {
        tokio::fs::remove_file(&temp_path).await.ok();
        return Err(io_error(OP_ATOMIC_WRITE, &temp_path, e));
    }

    if let Err(e) = tokio::fs::rename(&temp_path, target_path).await {
        tokio::fs::remove_file(&temp_path).await.ok();
        return Err(io_error(OP_ATOMIC_WRITE, target_path, e));
    }

    Ok(())
}
