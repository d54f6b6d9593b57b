//! Built-in diagnostic rules and their data form

use serde::{Deserialize, Serialize};

use super::predicates::{kind_in, kind_is, message_contains, op_is, PredicateDef};
use super::resolvers::Rule;
use super::Disposition;
use crate::errors::{ExError, ExErrorKind};
use crate::specification::SpecificationExt;

/// Operation name used when a snapshot file is read from disk
pub const OP_READ_SNAPSHOT_FILE: &str = "read_snapshot_file";

/// The default rule set, most specific first
pub fn builtin_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            kind_is(ExErrorKind::Cancelled),
            "The operation was cancelled",
            Disposition::Retryable,
        ),
        Rule::new(
            kind_is(ExErrorKind::DatabaseNotFound),
            "The database could not be found",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::Forbidden),
            "Access to the path was denied",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::Unauthorised)
                .or(message_contains("unauthorized"))
                .boxed(),
            "Authentication with the target store failed",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::NotFound)
                .and(op_is(OP_READ_SNAPSHOT_FILE))
                .boxed(),
            "The schema file could not be found",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::Timeout),
            "The operation timed out",
            Disposition::Retryable,
        ),
        Rule::new(
            kind_is(ExErrorKind::ExternalService)
                .and(
                    message_contains("connection refused")
                        .or(message_contains("unreachable")),
                )
                .boxed(),
            "The target store could not be reached",
            Disposition::Retryable,
        ),
        Rule::new(
            kind_in(&[ExErrorKind::InvalidSnapshot, ExErrorKind::Serialization]),
            "The schema definition could not be parsed",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::DuplicateObject),
            "The schema defines the same object more than once",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::UnknownObjectKind),
            "The schema contains an unsupported object kind",
            Disposition::Fatal,
        ),
        Rule::new(
            kind_is(ExErrorKind::InvalidDefinition),
            "The object definition was rejected by the target",
            Disposition::Skippable,
        ),
        Rule::new(
            kind_is(ExErrorKind::NotFound),
            "The requested object could not be found",
            Disposition::Skippable,
        ),
    ]
}

/// A rule as read from configuration
///
/// ```toml
/// [[diagnostics.rules]]
/// when = { all = [{ kind = "ERR_IO" }, { message_contains = "no space" }] }
/// message = "The target disk is full"
/// disposition = "retryable"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    pub when: PredicateDef,
    pub message: String,
    #[serde(default)]
    pub disposition: Disposition,
}

impl RuleDef {
    /// # Errors
    ///
    /// Returns `InvalidInput` if the predicate names an unknown error code.
    pub fn compile(&self) -> Result<Rule, ExError> {
        Ok(Rule::new(
            self.when.compile()?,
            self.message.clone(),
            self.disposition,
        ))
    }
}
