//! Compare, select, and reconcile in one run

use schemasync_core::contracts::{SchemaWriter, SnapshotProvider};
use schemasync_core::diff::SchemaDifference;
use schemasync_core::errors::SyncError;
use schemasync_core::logging_facility::run_span;
use schemasync_core::policy::SyncPolicy;
use schemasync_core_types::RunContext;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::commands::compare::{compare, Comparison};
use crate::commands::reconcile::apply_differences;
use crate::commands::report::SyncReport;
use crate::commands::select::Selection;

#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub comparison: Comparison,
    /// The differences handed to the driver
    pub selected: Vec<SchemaDifference>,
    pub report: SyncReport,
}

/// Compare `source` with `target`, keep the `selection`, apply it via `writer`
///
/// All events of the run carry the run id of `ctx`.
///
/// # Errors
///
/// Any [`SyncError`] from [`compare`] or [`apply_differences`].
pub async fn sync(
    ctx: &RunContext,
    source: &dyn SnapshotProvider,
    target: &dyn SnapshotProvider,
    writer: &dyn SchemaWriter,
    selection: &Selection,
    policy: &SyncPolicy,
    cancel: &CancellationToken,
) -> Result<SyncOutcome, SyncError> {
    async move {
        let comparison = compare(source, target).await?;
        let selected = selection.apply(&comparison.differences);
        let report = apply_differences(&selected, writer, policy, cancel).await?;
        Ok(SyncOutcome {
            comparison,
            selected,
            report,
        })
    }
    .instrument(run_span(ctx))
    .await
}
