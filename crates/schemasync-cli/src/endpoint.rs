//! Command-line schema locations
//!
//! A location ending in `.yaml`, `.yml` or `.json` is a read-only snapshot
//! file; anything else is a schema directory.

use std::path::Path;

use schemasync_core::contracts::{SchemaWriter, SnapshotProvider};
use schemasync_core::errors::{ExError, ExErrorKind, SnapshotSide, SyncError};
use schemasync_store::{FileFormat, FsSchemaStore, SnapshotFile};

pub enum Endpoint {
    File(SnapshotFile),
    Directory(FsSchemaStore),
}

impl Endpoint {
    /// Open `location`, failing if a directory does not exist
    pub async fn open(location: &Path) -> Result<Self, ExError> {
        if FileFormat::from_path(location).is_ok() {
            Ok(Endpoint::File(SnapshotFile::new(location)?))
        } else {
            Ok(Endpoint::Directory(FsSchemaStore::open(location).await?))
        }
    }

    /// Open a schema directory, creating it when missing
    pub async fn create_directory(location: &Path) -> Result<Self, ExError> {
        if FileFormat::from_path(location).is_ok() {
            return Err(read_only(location));
        }
        Ok(Endpoint::Directory(FsSchemaStore::create(location).await?))
    }

    pub fn provider(&self) -> &dyn SnapshotProvider {
        match self {
            Endpoint::File(file) => file,
            Endpoint::Directory(store) => store,
        }
    }

    /// Writer for this location; snapshot files cannot be written
    pub fn writer(&self) -> Result<&dyn SchemaWriter, ExError> {
        match self {
            Endpoint::File(file) => Err(read_only(file.path())),
            Endpoint::Directory(store) => Ok(store),
        }
    }
}

fn read_only(path: &Path) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("open_target")
        .with_message(format!(
            "{} is a snapshot file and cannot be a sync target; use a schema directory or --dry-run",
            path.display()
        ))
}

/// Attribute an open or load failure to one side of the run
pub fn on_side(side: SnapshotSide) -> impl Fn(ExError) -> ExError {
    move |source| SyncError::Load { side, source }.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extension_selects_snapshot_file() {
        let endpoint = Endpoint::open(Path::new("does/not/matter.yml")).await.unwrap();
        assert!(matches!(endpoint, Endpoint::File(_)));
        let err = endpoint.writer().err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_missing_directory_is_database_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Endpoint::open(&dir.path().join("absent")).await.err().unwrap();
        assert_eq!(err.kind(), ExErrorKind::DatabaseNotFound);
    }

    #[tokio::test]
    async fn test_create_directory() {
        let dir = tempfile::tempdir().unwrap();
        let endpoint = Endpoint::create_directory(&dir.path().join("fresh"))
            .await
            .unwrap();
        assert!(endpoint.writer().is_ok());
        assert!(dir.path().join("fresh").is_dir());
    }
}
