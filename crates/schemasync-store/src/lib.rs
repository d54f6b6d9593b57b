//! schemasync store - reference adapters for the provider/writer contracts
//!
//! Provides:
//! - Snapshot files (YAML/JSON, format v1) as a read-only provider
//! - A directory-backed store, one definition file per object, atomic writes
//! - An in-memory store for dry runs and tests

pub mod errors;
pub mod fs;
pub mod memory;
pub mod snapshot_file;
pub mod validation;

// Re-export key types
pub use errors::Result;
pub use fs::FsSchemaStore;
pub use memory::MemoryStore;
pub use snapshot_file::{FileFormat, SnapshotFile};
