//! Ports to the systems that hold schemas
//!
//! The comparison and reconciliation engines only see these traits; concrete
//! stores (files, directories, memory, a live cluster) implement them.

use async_trait::async_trait;

use crate::errors::ExError;
use crate::model::{ObjectKind, SchemaObject, SchemaSnapshot};
use crate::policy::WriteOptions;

/// Produces a full snapshot of one side
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Load every object this side currently defines
    ///
    /// # Errors
    ///
    /// Any failure to read or parse the underlying schema.
    async fn load_snapshot(&self) -> Result<SchemaSnapshot, ExError>;

    /// Short human label for logs and error messages, e.g. a path or URI
    fn describe(&self) -> String;
}

/// Applies changes to the target side
///
/// Implementations must make `create_or_alter` idempotent: writing an object
/// that already has the same definition succeeds and changes nothing.
#[async_trait]
pub trait SchemaWriter: Send + Sync {
    async fn create_or_alter(
        &self,
        object: &SchemaObject,
        options: &WriteOptions,
    ) -> Result<(), ExError>;

    /// Remove the named object of `kind`
    ///
    /// # Errors
    ///
    /// `NotFound` if no such object exists.
    async fn delete(&self, kind: ObjectKind, name: &str) -> Result<(), ExError>;
}
