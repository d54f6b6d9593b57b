//! schemasync core - schema comparison and diagnostics kernel
//!
//! This crate holds the parts of schemasync that never touch a store directly:
//! - Table and function object model, and per-side snapshots
//! - The three-way difference algorithm and the ordered difference list
//! - The error facility (`ExError`, stable codes, `SyncError`)
//! - Specification combinators and the diagnostic classifier built on them
//! - Sync policy and the provider/writer contracts adapters implement
//! - The structured logging facility

pub mod contracts;
pub mod diagnostics;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod specification;

#[doc(hidden)]
pub use schemasync_core_types as __core_types;

// Re-export commonly used types
pub use contracts::{SchemaWriter, SnapshotProvider};
pub use diagnostics::{Classifier, Diagnosis, Disposition};
pub use diff::{compare_snapshots, DifferenceKind, SchemaDifference};
pub use errors::{ExError, ExErrorKind, Result, SnapshotSide, SyncError};
pub use model::{ObjectKind, SchemaObject, SchemaSnapshot};
pub use policy::{FailureMode, SyncPolicy, WriteOptions};
