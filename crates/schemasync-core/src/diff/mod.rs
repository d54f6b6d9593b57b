//! Schema difference computation.
//!
//! Compares two schema snapshots and produces an ordered, flattened list of
//! typed differences suitable for operator review and reconciliation.
//!
//! ## Entry point
//!
//! ```
//! use schemasync_core::diff::compare_snapshots;
//! use schemasync_core::model::SchemaSnapshot;
//!
//! let differences = compare_snapshots(&SchemaSnapshot::new(), &SchemaSnapshot::new());
//! assert!(differences.is_empty());
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no I/O, no shared state, never fails.
//! - **Determinism**: identical inputs produce identical output order.
//! - **Source wins**: a modified object always carries the source definition.

pub mod engine;
pub mod human_summary;
pub mod mapper;
pub mod model;

pub use engine::{diff_maps, MapDiff};
pub use human_summary::render_human_summary;
pub use mapper::{compare_snapshots, map_differences};
pub use model::{DifferenceKind, SchemaDifference};
