//! Outcome of a successful reconciliation run

use chrono::{DateTime, Utc};
use schemasync_core::diff::{DifferenceKind, SchemaDifference};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    /// Differences supplied to the run
    pub total: usize,
    pub created: usize,
    pub altered: usize,
    pub deleted: usize,
    /// Target-only objects left in place because deletes were not allowed
    pub skipped_deletes: Vec<SchemaDifference>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    pub(crate) fn begin(total: usize) -> Self {
        let now = Utc::now();
        Self {
            total,
            created: 0,
            altered: 0,
            deleted: 0,
            skipped_deletes: Vec::new(),
            started_at: now,
            finished_at: now,
        }
    }

    pub(crate) fn record(&mut self, kind: DifferenceKind) {
        match kind {
            DifferenceKind::OnlyInSource => self.created += 1,
            DifferenceKind::Modified => self.altered += 1,
            DifferenceKind::OnlyInTarget => self.deleted += 1,
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    /// Writer calls that succeeded
    pub fn applied(&self) -> usize {
        self.created + self.altered + self.deleted
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} altered, {} deleted",
            self.created, self.altered, self.deleted
        )?;
        if !self.skipped_deletes.is_empty() {
            write!(
                f,
                ", {} delete(s) skipped (deletes not allowed)",
                self.skipped_deletes.len()
            )?;
        }
        Ok(())
    }
}
