//! `schemasync sync SOURCE TARGET`
//!
//! The target must be a schema directory unless `--dry-run` is given; a dry
//! run applies the differences to an in-memory copy of the target.

use std::path::PathBuf;

use clap::Args;
use schemasync_core::errors::{ExError, SnapshotSide};
use schemasync_core::policy::{FailureMode, SyncPolicy};
use schemasync_core_types::RunContext;
use schemasync_engine::{sync, CancellationToken};
use schemasync_store::MemoryStore;

use crate::commands::FilterArgs;
use crate::config::SyncSettings;
use crate::endpoint::{on_side, Endpoint};
use crate::output::{render_sync, OutputFormat};

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Desired schema: a .yaml/.yml/.json snapshot file or a schema directory
    pub source: PathBuf,

    /// Schema directory to bring in line with the source
    pub target: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Delete objects that exist only in the target
    #[arg(long)]
    pub allow_delete: bool,

    /// Attempt every difference and report all failures together
    #[arg(long)]
    pub continue_on_error: bool,

    /// Create the target directory if it does not exist
    #[arg(long)]
    pub create_target: bool,

    /// Show what would change without writing to the target
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SyncArgs {
    /// Settings-file policy with command-line flags applied on top
    pub fn policy(&self, settings: &SyncSettings) -> SyncPolicy {
        let mut policy = settings.policy();
        if self.allow_delete {
            policy = policy.with_allow_delete(true);
        }
        if self.continue_on_error {
            policy = policy.with_failure_mode(FailureMode::ContinueOnError);
        }
        policy
    }
}

pub async fn execute(
    args: SyncArgs,
    settings: &SyncSettings,
    ctx: &RunContext,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let policy = args.policy(settings);
    let selection = args.filter.selection();

    let source = Endpoint::open(&args.source)
        .await
        .map_err(on_side(SnapshotSide::Source))?;
    let target = if args.create_target && !args.dry_run {
        Endpoint::create_directory(&args.target).await
    } else {
        Endpoint::open(&args.target).await
    }
    .map_err(on_side(SnapshotSide::Target))?;

    let outcome = if args.dry_run {
        let current = target
            .provider()
            .load_snapshot()
            .await
            .map_err(on_side(SnapshotSide::Target))?;
        let preview = MemoryStore::with_snapshot("dry-run", current);
        sync(
            ctx,
            source.provider(),
            &preview,
            &preview,
            &selection,
            &policy,
            cancel,
        )
        .await
    } else {
        let writer = target.writer()?;
        sync(
            ctx,
            source.provider(),
            target.provider(),
            writer,
            &selection,
            &policy,
            cancel,
        )
        .await
    }
    .map_err(ExError::from)?;

    print!("{}", render_sync(&outcome, args.dry_run, args.format)?);
    Ok(())
}
