//! Directory-backed store

pub mod atomic;
pub mod fs_store;
pub mod naming;

pub use fs_store::FsSchemaStore;
