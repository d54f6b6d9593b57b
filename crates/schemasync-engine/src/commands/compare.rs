//! Load both sides and compute their differences

use std::time::Instant;

use schemasync_core::contracts::SnapshotProvider;
use schemasync_core::diff::{compare_snapshots, SchemaDifference};
use schemasync_core::errors::{SnapshotSide, SyncError};
use schemasync_core::model::SchemaSnapshot;
use schemasync_core::{log_op_end, log_op_error, log_op_start};
use serde::Serialize;

/// Result of comparing a source with a target
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Ordered differences (tables first; create, delete, alter within a kind)
    pub differences: Vec<SchemaDifference>,
    pub source_digest: String,
    pub target_digest: String,
    #[serde(skip)]
    pub source: SchemaSnapshot,
    #[serde(skip)]
    pub target: SchemaSnapshot,
}

impl Comparison {
    pub fn is_in_sync(&self) -> bool {
        self.differences.is_empty()
    }
}

async fn load(
    provider: &dyn SnapshotProvider,
    side: SnapshotSide,
) -> Result<SchemaSnapshot, SyncError> {
    provider.load_snapshot().await.map_err(|source| {
        let message = if source.message().is_empty() {
            provider.describe()
        } else {
            format!("{} ({})", source.message(), provider.describe())
        };
        SyncError::Load {
            side,
            source: source.with_message(message),
        }
    })
}

/// Load source and target concurrently, then diff them
///
/// # Errors
///
/// `SyncError::Load` naming the side whose provider failed.
pub async fn compare(
    source: &dyn SnapshotProvider,
    target: &dyn SnapshotProvider,
) -> Result<Comparison, SyncError> {
    log_op_start!(
        "compare",
        source = %source.describe(),
        target = %target.describe()
    );
    let start = Instant::now();

    let (source_snapshot, target_snapshot) =
        tokio::try_join!(load(source, SnapshotSide::Source), load(target, SnapshotSide::Target))
            .map_err(|e| {
                log_op_error!(
                    "compare",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                e
            })?;

    let differences = compare_snapshots(&source_snapshot, &target_snapshot);
    let comparison = Comparison {
        differences,
        source_digest: source_snapshot.digest(),
        target_digest: target_snapshot.digest(),
        source: source_snapshot,
        target: target_snapshot,
    };

    log_op_end!(
        "compare",
        duration_ms = start.elapsed().as_millis() as u64,
        differences = comparison.differences.len() as u64
    );
    Ok(comparison)
}
