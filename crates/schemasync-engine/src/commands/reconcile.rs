//! Reconciliation driver
//!
//! Applies a selected, ordered list of differences to a target writer one at
//! a time. `OnlyInSource` and `Modified` become create-or-alter calls;
//! `OnlyInTarget` becomes a delete only when the policy allows deletes.
//!
//! ## Failure semantics
//!
//! - Cancellation is checked before each item; an in-flight call completes.
//! - Fail-fast (default): the first failure stops the run. Earlier writes
//!   stay applied and the error records where the run stopped and what was
//!   never attempted.
//! - Continue-on-error: every item is attempted and all failures are
//!   returned together.
//! - Nothing is retried.
//!
//! ## Logging Ownership
//!
//! This module owns lifecycle logging for `apply_differences` (the run) and
//! `apply_difference` (each item).

use std::time::Instant;

use schemasync_core::contracts::SchemaWriter;
use schemasync_core::diff::{DifferenceKind, SchemaDifference};
use schemasync_core::errors::{ApplyFailure, ExError, ExErrorKind, SyncError};
use schemasync_core::policy::{FailureMode, SyncPolicy};
use schemasync_core::{log_op_cancelled, log_op_end, log_op_error, log_op_start};
use schemasync_core_types::schema::EVENT_SKIPPED;
use tokio_util::sync::CancellationToken;

use crate::commands::report::SyncReport;

const OP_RUN: &str = "apply_differences";
const OP_ITEM: &str = "apply_difference";

/// Apply `differences` in order against `writer`
///
/// # Errors
///
/// - `SyncError::Cancelled` if `cancel` fired before an item, or the writer
///   reported a cancellation
/// - `SyncError::Apply` for the first failure in fail-fast mode
/// - `SyncError::Sync` when the writer's error already is a sync failure
/// - `SyncError::Batch` with every failure in continue-on-error mode
pub async fn apply_differences(
    differences: &[SchemaDifference],
    writer: &dyn SchemaWriter,
    policy: &SyncPolicy,
    cancel: &CancellationToken,
) -> Result<SyncReport, SyncError> {
    let total = differences.len();
    log_op_start!(
        OP_RUN,
        total = total as u64,
        allow_delete = policy.allow_delete,
        failure_mode = ?policy.failure_mode
    );
    let start = Instant::now();

    let result = apply_differences_impl(differences, writer, policy, cancel).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(report) => {
            log_op_end!(
                OP_RUN,
                duration_ms = duration_ms,
                applied = report.applied() as u64,
                skipped = report.skipped_deletes.len() as u64
            );
        }
        Err(SyncError::Cancelled { applied, .. }) => {
            log_op_cancelled!(OP_RUN, duration_ms = duration_ms, applied = *applied as u64);
        }
        Err(err) => {
            log_op_error!(OP_RUN, err.clone(), duration_ms = duration_ms);
        }
    }

    result
}

async fn apply_differences_impl(
    differences: &[SchemaDifference],
    writer: &dyn SchemaWriter,
    policy: &SyncPolicy,
    cancel: &CancellationToken,
) -> Result<SyncReport, SyncError> {
    let total = differences.len();
    let mut report = SyncReport::begin(total);
    let mut failures = Vec::new();

    for (index, difference) in differences.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled {
                applied: report.applied(),
                total,
            });
        }

        if difference.kind() == DifferenceKind::OnlyInTarget && !policy.allow_delete {
            tracing::info!(
                component = module_path!(),
                op = OP_ITEM,
                event = EVENT_SKIPPED,
                index = index as u64,
                object_kind = %difference.object_kind(),
                object_name = difference.name(),
                "delete not allowed by policy"
            );
            report.skipped_deletes.push(difference.clone());
            continue;
        }

        match apply_one(index, difference, writer, policy).await {
            Ok(()) => report.record(difference.kind()),
            Err(error) if error.kind() == ExErrorKind::Cancelled => {
                return Err(SyncError::Cancelled {
                    applied: report.applied(),
                    total,
                });
            }
            Err(error) => match policy.failure_mode {
                FailureMode::FailFast => {
                    return Err(fail_fast(index, total, report.applied(), differences, error));
                }
                FailureMode::ContinueOnError => failures.push(ApplyFailure {
                    index,
                    difference: difference.clone(),
                    error,
                }),
            },
        }
    }

    if failures.is_empty() {
        Ok(report.finish())
    } else {
        Err(SyncError::Batch {
            applied: report.applied(),
            total,
            failures,
        })
    }
}

/// Wrap the failure at `index`, unless it already is a sync failure
fn fail_fast(
    index: usize,
    total: usize,
    applied: usize,
    differences: &[SchemaDifference],
    error: ExError,
) -> SyncError {
    if error.kind() == ExErrorKind::SyncFailed {
        return SyncError::Sync(error);
    }
    SyncError::Apply {
        index,
        total,
        applied,
        difference: Box::new(differences[index].clone()),
        remaining: differences[index + 1..].to_vec(),
        source: error,
    }
}

async fn apply_one(
    index: usize,
    difference: &SchemaDifference,
    writer: &dyn SchemaWriter,
    policy: &SyncPolicy,
) -> Result<(), ExError> {
    log_op_start!(
        OP_ITEM,
        index = index as u64,
        object_kind = %difference.object_kind(),
        object_name = difference.name(),
        diff_kind = difference.kind().as_str()
    );
    let start = Instant::now();

    let result = match difference.kind() {
        DifferenceKind::OnlyInSource | DifferenceKind::Modified => {
            writer
                .create_or_alter(difference.object(), &policy.write_options)
                .await
        }
        DifferenceKind::OnlyInTarget => {
            writer
                .delete(difference.object_kind(), difference.name())
                .await
        }
    };

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(()) => {
            log_op_end!(OP_ITEM, duration_ms = duration_ms, index = index as u64);
        }
        Err(err) => {
            log_op_error!(
                OP_ITEM,
                err.clone(),
                duration_ms = duration_ms,
                index = index as u64,
                object_name = difference.name()
            );
        }
    }

    result
}
