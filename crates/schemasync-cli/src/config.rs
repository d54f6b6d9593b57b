//! Settings file
//!
//! Loaded from `--config` / `SCHEMASYNC_CONFIG`, or `schemasync.toml` in the
//! working directory when present. Every key is optional.
//!
//! ```toml
//! [logging]
//! profile = "production"      # development, production, test
//!
//! [sync]
//! allow_delete = false
//! failure_mode = "fail_fast"  # or "continue_on_error"
//! validate_functions = true
//! pretty = true
//!
//! [[diagnostics.rules]]
//! when = { kind = "ERR_IO" }
//! message = "The schema directory is not writable"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use schemasync_core::diagnostics::{Classifier, Rule, RuleDef};
use schemasync_core::logging_facility::Profile;
use schemasync_core::policy::{FailureMode, SyncPolicy, WriteOptions};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "schemasync.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub sync: SyncSettings,
    pub diagnostics: DiagnosticsSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub allow_delete: bool,
    pub failure_mode: FailureMode,
    pub validate_functions: bool,
    pub pretty: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        let policy = SyncPolicy::default();
        Self {
            allow_delete: policy.allow_delete,
            failure_mode: policy.failure_mode,
            validate_functions: policy.write_options.validate_functions,
            pretty: policy.write_options.pretty,
        }
    }
}

impl SyncSettings {
    pub fn policy(&self) -> SyncPolicy {
        SyncPolicy::default()
            .with_allow_delete(self.allow_delete)
            .with_failure_mode(self.failure_mode)
            .with_write_options(WriteOptions {
                validate_functions: self.validate_functions,
                pretty: self.pretty,
            })
    }
}

/// User diagnostic rules, consulted before the built-in ones
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
    pub rules: Vec<RuleDef>,
}

impl Settings {
    /// Load settings
    ///
    /// An explicit `path` must exist. Without one, `schemasync.toml` in the
    /// working directory is used if present, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        // Compile once up front so a bad rule fails at startup
        settings.diagnostics.compile()?;
        Ok(settings)
    }

    /// Classifier with the user rules ahead of the built-ins
    pub fn classifier(&self) -> anyhow::Result<Classifier> {
        Ok(Classifier::with_rules(self.diagnostics.compile()?))
    }
}

impl DiagnosticsSettings {
    fn compile(&self) -> anyhow::Result<Vec<Rule>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, def)| {
                def.compile()
                    .with_context(|| format!("diagnostics rule #{}", i + 1))
            })
            .collect()
    }
}
