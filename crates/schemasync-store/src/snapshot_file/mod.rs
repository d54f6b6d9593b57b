//! Schema snapshot files (YAML or JSON, format v1)

pub mod format_v1;
pub mod parser;
pub mod provider;

pub use format_v1::SnapshotFileV1;
pub use parser::{parse_snapshot_str, render_snapshot, FileFormat, SCHEMA_VERSION};
pub use provider::SnapshotFile;
