//! schemasync engine - orchestration layer
//!
//! Coordinates snapshot providers, the difference computation from
//! schemasync-core, and a target writer:
//! - `compare`: load both sides concurrently and diff them
//! - `apply_differences`: the reconciliation driver
//! - `sync`: compare, select, and apply under one run id

pub mod commands;

pub use commands::compare::{compare, Comparison};
pub use commands::reconcile::apply_differences;
pub use commands::report::SyncReport;
pub use commands::select::Selection;
pub use commands::sync::{sync, SyncOutcome};
pub use tokio_util::sync::CancellationToken;
