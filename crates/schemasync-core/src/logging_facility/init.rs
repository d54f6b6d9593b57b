//! Logging initialization

use std::str::FromStr;
use std::sync::Once;

use schemasync_core_types::schema::FIELD_TRACE_ID;
use schemasync_core_types::RunContext;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::errors::{ExError, ExErrorKind};

/// Logging profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Human-readable output, debug level
    #[default]
    Development,
    /// JSON lines, info level
    Production,
    /// No output; tests install the capture layer instead
    Test,
}

impl FromStr for Profile {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" | "json" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_log_profile")
                .with_message(format!("Unknown logging profile: '{}'", other))),
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the global subscriber; later calls are no-ops
///
/// `RUST_LOG` overrides the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("schemasync=debug")),
                )
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("schemasync=info")),
                )
                .try_init()
                .ok();
        }
        Profile::Test => {
            tracing_subscriber::registry().try_init().ok();
        }
    });
}

/// Span that tags every event of one compare or sync run
pub fn run_span(ctx: &RunContext) -> tracing::Span {
    let span = tracing::info_span!(
        "schemasync_run",
        run_id = ctx.run_id.as_str(),
        trace_id = tracing::field::Empty,
    );
    if let Some(trace_id) = &ctx.trace_id {
        span.record(FIELD_TRACE_ID, trace_id.as_str());
    }
    span
}
