//! Built-in resolver implementations.

use super::{resolve_chain, Diagnosis, Disposition, MessageResolver};
use crate::errors::ExError;
use crate::specification::{BoxedSpecification, Specification};

/// Unwraps one level of a batch error
///
/// Each member error is handed to the rest of the chain in turn; the first
/// diagnosis produced for any member wins. Declines when no member maps to a
/// message, including when the error is not a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchResolver;

impl MessageResolver for BatchResolver {
    fn resolve(&self, error: &ExError, rest: &[Box<dyn MessageResolver>]) -> Option<Diagnosis> {
        error
            .related()
            .iter()
            .find_map(|inner| resolve_chain(rest, inner))
    }
}

/// Classifies a wrapping error by its direct cause
///
/// Declines when there is no cause or the rest of the chain declines it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CauseResolver;

impl MessageResolver for CauseResolver {
    fn resolve(&self, error: &ExError, rest: &[Box<dyn MessageResolver>]) -> Option<Diagnosis> {
        error
            .source_error()
            .and_then(|cause| resolve_chain(rest, cause))
    }
}

/// A declarative (predicate, diagnosis) pair
pub struct Rule {
    spec: BoxedSpecification<ExError>,
    diagnosis: Diagnosis,
}

impl Rule {
    pub fn new(
        spec: BoxedSpecification<ExError>,
        message: impl Into<String>,
        disposition: Disposition,
    ) -> Self {
        Self {
            spec,
            diagnosis: Diagnosis::new(message, disposition),
        }
    }

    pub fn matches(&self, error: &ExError) -> bool {
        self.spec.is_satisfied_by(error)
    }

    pub fn diagnosis(&self) -> &Diagnosis {
        &self.diagnosis
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("diagnosis", &self.diagnosis)
            .finish_non_exhaustive()
    }
}

/// Evaluates rules in registration order; first satisfied rule wins
#[derive(Debug, Default)]
pub struct RuleResolver {
    rules: Vec<Rule>,
}

impl RuleResolver {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl MessageResolver for RuleResolver {
    fn resolve(&self, error: &ExError, _rest: &[Box<dyn MessageResolver>]) -> Option<Diagnosis> {
        self.rules
            .iter()
            .find(|rule| rule.matches(error))
            .map(|rule| rule.diagnosis.clone())
    }
}
