//! `schemasync compare SOURCE TARGET`

use std::path::PathBuf;

use clap::Args;
use schemasync_core::errors::{ExError, SnapshotSide};
use schemasync_core::logging_facility::run_span;
use schemasync_core_types::RunContext;
use schemasync_engine::compare;
use tracing::Instrument;

use crate::commands::FilterArgs;
use crate::endpoint::{on_side, Endpoint};
use crate::output::{render_comparison, OutputFormat};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Desired schema: a .yaml/.yml/.json snapshot file or a schema directory
    pub source: PathBuf,

    /// Current schema: a snapshot file or a schema directory
    pub target: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn execute(args: CompareArgs, ctx: &RunContext) -> anyhow::Result<()> {
    let source = Endpoint::open(&args.source)
        .await
        .map_err(on_side(SnapshotSide::Source))?;
    let target = Endpoint::open(&args.target)
        .await
        .map_err(on_side(SnapshotSide::Target))?;

    let comparison = compare(source.provider(), target.provider())
        .instrument(run_span(ctx))
        .await
        .map_err(ExError::from)?;
    let selected = args.filter.selection().apply(&comparison.differences);

    print!("{}", render_comparison(&comparison, &selected, args.format)?);
    Ok(())
}
