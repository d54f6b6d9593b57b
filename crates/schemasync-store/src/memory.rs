//! In-memory schema store
//!
//! Backs dry runs and tests. Holds one snapshot behind an async lock and
//! applies writes to it with the same checks as the directory store.

use async_trait::async_trait;
use schemasync_core::contracts::{SchemaWriter, SnapshotProvider};
use schemasync_core::model::{ObjectKind, SchemaObject, SchemaSnapshot};
use schemasync_core::policy::WriteOptions;
use tokio::sync::RwLock;

use crate::errors::{object_not_found, Result};
use crate::validation::validate_for_write;

#[derive(Debug, Default)]
pub struct MemoryStore {
    label: String,
    snapshot: RwLock<SchemaSnapshot>,
}

impl MemoryStore {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_snapshot(label, SchemaSnapshot::new())
    }

    /// Start from an existing snapshot, e.g. a copy of a real target for a dry run
    pub fn with_snapshot(label: impl Into<String>, snapshot: SchemaSnapshot) -> Self {
        Self {
            label: label.into(),
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Copy of the current contents
    pub async fn snapshot(&self) -> SchemaSnapshot {
        self.snapshot.read().await.clone()
    }
}

#[async_trait]
impl SnapshotProvider for MemoryStore {
    async fn load_snapshot(&self) -> Result<SchemaSnapshot> {
        Ok(self.snapshot().await)
    }

    fn describe(&self) -> String {
        format!("memory:{}", self.label)
    }
}

#[async_trait]
impl SchemaWriter for MemoryStore {
    async fn create_or_alter(&self, object: &SchemaObject, options: &WriteOptions) -> Result<()> {
        validate_for_write(object, options)?;
        self.snapshot.write().await.upsert(object.clone());
        Ok(())
    }

    async fn delete(&self, kind: ObjectKind, name: &str) -> Result<()> {
        self.snapshot
            .write()
            .await
            .remove(kind, name)
            .map(|_| ())
            .ok_or_else(|| object_not_found("delete", kind, name))
    }
}
