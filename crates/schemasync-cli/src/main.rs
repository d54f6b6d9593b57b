//! schemasync CLI
//!
//! Compare a desired schema with a current one and reconcile the difference.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use schemasync_core::diagnostics::Classifier;
use schemasync_core::errors::{ExError, ExErrorKind};
use schemasync_core::logging_facility::{self, Profile};
use schemasync_core_types::{RunContext, TraceId};
use schemasync_engine::CancellationToken;

mod commands;
mod config;
mod endpoint;
mod output;

use config::Settings;

const EXIT_FAILURE: u8 = 1;
const EXIT_CANCELLED: u8 = 130;

#[derive(Debug, Parser)]
#[command(name = "schemasync")]
#[command(about = "schemasync - Compare and reconcile database schemas", long_about = None)]
struct Cli {
    /// Settings file (default: ./schemasync.toml when present)
    #[arg(long, global = true, env = "SCHEMASYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Logging profile: development, production, test
    #[arg(long, global = true, env = "SCHEMASYNC_LOG_PROFILE")]
    log_profile: Option<Profile>,

    /// Trace id of an enclosing workflow, attached to every log line of the run
    #[arg(long, global = true, env = "SCHEMASYNC_TRACE_ID")]
    trace_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the differences between a source and a target schema
    Compare(commands::compare::CompareArgs),
    /// Apply source differences to a target schema directory
    Sync(commands::sync::SyncArgs),
    /// Write a schema as a snapshot document
    Export(commands::export::ExportArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    logging_facility::init(cli.log_profile.unwrap_or(settings.logging.profile));

    let classifier = match settings.classifier() {
        Ok(classifier) => classifier,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping after the current object");
            on_interrupt.cancel();
        }
    });

    let ctx = run_context(cli.trace_id);
    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args, &ctx).await,
        Commands::Sync(args) => commands::sync::execute(args, &settings.sync, &ctx, &cancel).await,
        Commands::Export(args) => commands::export::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_error(&classifier, &e)),
    }
}

fn run_context(trace_id: Option<String>) -> RunContext {
    match trace_id {
        Some(trace_id) => RunContext::new().with_trace_id(TraceId::from_string(trace_id)),
        None => RunContext::new(),
    }
}

/// Print the diagnosis for `err` and pick the exit code
fn report_error(classifier: &Classifier, err: &anyhow::Error) -> u8 {
    let Some(ex) = err.downcast_ref::<ExError>() else {
        eprintln!("Error: {:#}", err);
        return EXIT_FAILURE;
    };

    let diagnosis = classifier.classify(ex);
    tracing::debug!(
        err.code = ex.code(),
        disposition = %diagnosis.disposition,
        detail = %ex.full_message(),
        "command failed"
    );
    match failure_position(ex) {
        Some(position) => eprintln!("Error: {} ({})", diagnosis.message, position),
        None => eprintln!("Error: {}", diagnosis.message),
    }

    if ex.kind() == ExErrorKind::Cancelled {
        EXIT_CANCELLED
    } else {
        EXIT_FAILURE
    }
}

/// Where a fail-fast sync stopped, e.g. `stopped at function 'F', difference 3 of 4, 2 applied`
fn failure_position(ex: &ExError) -> Option<String> {
    if ex.kind() != ExErrorKind::SyncFailed {
        return None;
    }
    let index = ex.index()?;
    let progress = ex.progress()?;

    let object = match (ex.object_kind(), ex.object_name()) {
        (Some(kind), Some(name)) => format!("{} '{}'", kind, name),
        (None, Some(name)) => format!("'{}'", name),
        _ => "an object".to_string(),
    };
    Some(format!(
        "stopped at {}, difference {} of {}, {} applied",
        object,
        index + 1,
        progress.total,
        progress.applied
    ))
}
