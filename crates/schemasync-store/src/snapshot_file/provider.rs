//! Snapshot provider backed by a single schema file

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use schemasync_core::contracts::SnapshotProvider;
use schemasync_core::errors::ExError;
use schemasync_core::model::SchemaSnapshot;
use schemasync_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{io_error, Result, OP_READ_SNAPSHOT_FILE};
use crate::snapshot_file::parser::{parse_snapshot_str, FileFormat};

/// A YAML or JSON snapshot file on disk
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    format: FileFormat,
}

impl SnapshotFile {
    /// # Errors
    ///
    /// `InvalidInput` if the extension is not a supported format.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    async fn read(&self) -> Result<SchemaSnapshot> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| io_error(OP_READ_SNAPSHOT_FILE, &self.path, e))?;
        parse_snapshot_str(&content, self.format)
    }
}

#[async_trait]
impl SnapshotProvider for SnapshotFile {
    async fn load_snapshot(&self) -> std::result::Result<SchemaSnapshot, ExError> {
        let start = Instant::now();
        log_op_start!(OP_READ_SNAPSHOT_FILE, path = %self.path.display());

        match self.read().await {
            Ok(snapshot) => {
                log_op_end!(
                    OP_READ_SNAPSHOT_FILE,
                    duration_ms = start.elapsed().as_millis() as u64,
                    objects = snapshot.len() as u64
                );
                Ok(snapshot)
            }
            Err(err) => {
                log_op_error!(
                    OP_READ_SNAPSHOT_FILE,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemasync_core::errors::ExErrorKind;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_not_found_with_read_op() {
        let dir = TempDir::new().unwrap();
        let file = SnapshotFile::new(dir.path().join("absent.yaml")).unwrap();
        let err = file.load_snapshot().await.unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert_eq!(err.op(), Some(OP_READ_SNAPSHOT_FILE));
    }

    #[tokio::test]
    async fn test_load_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.yml");
        std::fs::write(
            &path,
            "schema_version: 1\ntables:\n  - name: Events\nfunctions:\n  - name: F\n    body: Events\n",
        )
        .unwrap();
        let file = SnapshotFile::new(&path).unwrap();
        let snapshot = file.load_snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(file.describe().ends_with("schema.yml"));
    }
}
