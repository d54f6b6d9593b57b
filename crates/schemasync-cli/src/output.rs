//! Rendering command results for the terminal

use clap::ValueEnum;
use schemasync_core::diff::{render_human_summary, SchemaDifference};
use schemasync_engine::{Comparison, SyncOutcome, SyncReport};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct CompareView<'a> {
    in_sync: bool,
    source_digest: &'a str,
    target_digest: &'a str,
    total: usize,
    differences: &'a [SchemaDifference],
}

#[derive(Serialize)]
struct SyncView<'a> {
    dry_run: bool,
    source_digest: &'a str,
    target_digest: &'a str,
    applied: &'a [SchemaDifference],
    report: &'a SyncReport,
}

/// Comparison result limited to the `selected` differences
pub fn render_comparison(
    comparison: &Comparison,
    selected: &[SchemaDifference],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = render_human_summary(selected);
            if selected.len() != comparison.differences.len() {
                out.push_str(&format!(
                    "{} of {} differences shown\n",
                    selected.len(),
                    comparison.differences.len()
                ));
            }
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&CompareView {
            in_sync: comparison.is_in_sync(),
            source_digest: &comparison.source_digest,
            target_digest: &comparison.target_digest,
            total: comparison.differences.len(),
            differences: selected,
        }),
    }
}

pub fn render_sync(
    outcome: &SyncOutcome,
    dry_run: bool,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            if dry_run {
                out.push_str("Dry run (target unchanged)\n");
            }
            if outcome.selected.is_empty() {
                out.push_str("Nothing to apply\n");
                return Ok(out);
            }
            for difference in &outcome.selected {
                let skipped = outcome.report.skipped_deletes.contains(difference);
                out.push_str(&format!(
                    "{} {} {}{}\n",
                    difference.kind().marker(),
                    difference.object_kind(),
                    difference.name(),
                    if skipped { " (skipped)" } else { "" }
                ));
            }
            out.push_str(&format!("{}\n", outcome.report));
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&SyncView {
            dry_run,
            source_digest: &outcome.comparison.source_digest,
            target_digest: &outcome.comparison.target_digest,
            applied: &outcome.selected,
            report: &outcome.report,
        }),
    }
}
