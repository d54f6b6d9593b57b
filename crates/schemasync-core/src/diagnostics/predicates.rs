//! Error predicates for diagnostic rules
//!
//! Leaf specifications over [`ExError`] plus [`PredicateDef`], a serde tree
//! that compiles into the same specifications so rules can be supplied as
//! configuration data.

use serde::{Deserialize, Serialize};

use crate::errors::{ExError, ExErrorKind};
use crate::specification::{any_of, from_fn, project, BoxedSpecification, SpecificationExt};

/// Error has exactly this kind
pub fn kind_is(kind: ExErrorKind) -> BoxedSpecification<ExError> {
    from_fn(move |e: &ExError| e.kind() == kind).boxed()
}

/// Error has one of these kinds
pub fn kind_in(kinds: &[ExErrorKind]) -> BoxedSpecification<ExError> {
    let kinds = kinds.to_vec();
    from_fn(move |e: &ExError| kinds.contains(&e.kind())).boxed()
}

/// Error was raised by this operation
pub fn op_is(op: &str) -> BoxedSpecification<ExError> {
    let op = op.to_string();
    from_fn(move |e: &ExError| e.op() == Some(op.as_str())).boxed()
}

/// Error message contains `needle` (ASCII case-insensitive)
pub fn message_contains(needle: &str) -> BoxedSpecification<ExError> {
    let needle = needle.to_ascii_lowercase();
    from_fn(move |e: &ExError| e.message().to_ascii_lowercase().contains(&needle)).boxed()
}

/// Any member of a batch error satisfies `inner` (members of members are not visited)
pub fn any_inner(inner: BoxedSpecification<ExError>) -> BoxedSpecification<ExError> {
    any_of(|e: &ExError| e.related(), inner).boxed()
}

/// The direct cause satisfies `inner`
pub fn cause(inner: BoxedSpecification<ExError>) -> BoxedSpecification<ExError> {
    project(|e: &ExError| e.source_error(), inner).boxed()
}

fn always(value: bool) -> BoxedSpecification<ExError> {
    from_fn(move |_: &ExError| value).boxed()
}

/// Data form of an error predicate
///
/// In TOML, a rule condition reads for example
/// `when = { all = [{ kind = "ERR_IO" }, { message_contains = "no space" }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateDef {
    /// Stable error code, e.g. `ERR_TIMEOUT`
    Kind(String),
    Op(String),
    MessageContains(String),
    /// All must hold; an empty list always holds
    All(Vec<PredicateDef>),
    /// At least one must hold; an empty list never holds
    Any(Vec<PredicateDef>),
    Not(Box<PredicateDef>),
    AnyInner(Box<PredicateDef>),
    Cause(Box<PredicateDef>),
}

impl PredicateDef {
    /// Compile into a specification
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a `kind` names an unknown error code.
    pub fn compile(&self) -> Result<BoxedSpecification<ExError>, ExError> {
        Ok(match self {
            PredicateDef::Kind(code) => {
                let kind = ExErrorKind::from_code(code).ok_or_else(|| {
                    ExError::new(ExErrorKind::InvalidInput)
                        .with_op("compile_predicate")
                        .with_message(format!("Unknown error code in rule: '{}'", code))
                })?;
                kind_is(kind)
            }
            PredicateDef::Op(op) => op_is(op),
            PredicateDef::MessageContains(needle) => message_contains(needle),
            PredicateDef::All(items) => {
                let mut spec = always(true);
                for item in items {
                    spec = spec.and(item.compile()?).boxed();
                }
                spec
            }
            PredicateDef::Any(items) => {
                let mut spec = always(false);
                for item in items {
                    spec = spec.or(item.compile()?).boxed();
                }
                spec
            }
            PredicateDef::Not(inner) => inner.compile()?.not().boxed(),
            PredicateDef::AnyInner(inner) => any_inner(inner.compile()?),
            PredicateDef::Cause(inner) => cause(inner.compile()?),
        })
    }
}
