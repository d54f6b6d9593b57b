//! Diagnostic classification of errors
//!
//! Turns an [`ExError`] into a short, user-actionable [`Diagnosis`]. A
//! [`Classifier`] holds an ordered chain of [`MessageResolver`]s; each either
//! produces a diagnosis or declines. The first diagnosis wins. When every
//! resolver declines, the error's own message text is used, so classification
//! always yields something and never fails.
//!
//! Classification is advisory: it never changes control flow.
//!
//! # Example
//!
//! ```
//! use schemasync_core::diagnostics::Classifier;
//! use schemasync_core::errors::{ExError, ExErrorKind};
//!
//! let classifier = Classifier::with_defaults();
//! let diagnosis = classifier.classify(&ExError::new(ExErrorKind::DatabaseNotFound));
//! assert_eq!(diagnosis.message, "The database could not be found");
//! ```

pub mod predicates;
pub mod resolvers;
pub mod rules;

use serde::{Deserialize, Serialize};

use crate::errors::ExError;

pub use predicates::PredicateDef;
pub use resolvers::{BatchResolver, CauseResolver, Rule, RuleResolver};
pub use rules::{builtin_rules, RuleDef};

/// What the caller can do about a classified failure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Transient; re-running the operation may succeed
    Retryable,
    /// Confined to one object; the rest of the run is unaffected
    Skippable,
    /// Needs operator action before retrying
    #[default]
    Fatal,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposition::Retryable => write!(f, "retryable"),
            Disposition::Skippable => write!(f, "skippable"),
            Disposition::Fatal => write!(f, "fatal"),
        }
    }
}

/// A user-facing message plus its actionable category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    pub message: String,
    pub disposition: Disposition,
}

impl Diagnosis {
    pub fn new(message: impl Into<String>, disposition: Disposition) -> Self {
        Self {
            message: message.into(),
            disposition,
        }
    }
}

/// One link of the classification chain
///
/// `rest` holds the resolvers registered after this one, for resolvers that
/// delegate an inner error to the remainder of the chain.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, error: &ExError, rest: &[Box<dyn MessageResolver>]) -> Option<Diagnosis>;
}

/// Run `chain` in order on `error`; first diagnosis wins
pub fn resolve_chain(chain: &[Box<dyn MessageResolver>], error: &ExError) -> Option<Diagnosis> {
    chain
        .iter()
        .enumerate()
        .find_map(|(i, resolver)| resolver.resolve(error, &chain[i + 1..]))
}

/// Ordered resolver chain with an always-matching default
#[derive(Default)]
pub struct Classifier {
    resolvers: Vec<Box<dyn MessageResolver>>,
}

impl Classifier {
    /// An empty chain; every error falls through to the default
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch unwrapping, cause unwrapping, then the built-in rules
    pub fn with_defaults() -> Self {
        Self::with_rules(Vec::new())
    }

    /// Like [`Classifier::with_defaults`], with `extra` rules consulted before the built-ins
    pub fn with_rules(extra: Vec<Rule>) -> Self {
        let mut classifier = Self::new()
            .with_resolver(BatchResolver)
            .with_resolver(CauseResolver);
        if !extra.is_empty() {
            classifier = classifier.with_resolver(RuleResolver::new(extra));
        }
        classifier.with_resolver(RuleResolver::new(builtin_rules()))
    }

    /// Append a resolver to the end of the chain
    pub fn with_resolver(mut self, resolver: impl MessageResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Number of registered resolvers (the default is not counted)
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Run the registered resolvers only; `None` if all decline
    pub fn try_resolve(&self, error: &ExError) -> Option<Diagnosis> {
        resolve_chain(&self.resolvers, error)
    }

    /// Classify `error`, falling back to its own message text
    pub fn classify(&self, error: &ExError) -> Diagnosis {
        self.try_resolve(error)
            .unwrap_or_else(|| Diagnosis::new(error.full_message(), Disposition::Fatal))
    }
}
