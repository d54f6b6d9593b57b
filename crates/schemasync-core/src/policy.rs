//! Reconciliation policy
//!
//! Controls which differences are applied and how failures are handled.
//! Defaults are conservative: target-only objects are left in place, and the
//! run stops at the first failure.

use serde::{Deserialize, Serialize};

/// What to do when applying one difference fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the first failure; later differences are not attempted
    #[default]
    FailFast,
    /// Attempt every difference, then report all failures together
    ContinueOnError,
}

/// Options forwarded to the schema writer on create-or-alter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Ask the target to validate function bodies before storing them
    pub validate_functions: bool,
    /// Store definitions in human-readable form where the target supports it
    pub pretty: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            validate_functions: true,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncPolicy {
    /// Delete objects that exist only in the target
    pub allow_delete: bool,
    pub failure_mode: FailureMode,
    pub write_options: WriteOptions,
}

impl SyncPolicy {
    pub fn with_allow_delete(mut self, allow_delete: bool) -> Self {
        self.allow_delete = allow_delete;
        self
    }

    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    pub fn with_write_options(mut self, write_options: WriteOptions) -> Self {
        self.write_options = write_options;
        self
    }
}
