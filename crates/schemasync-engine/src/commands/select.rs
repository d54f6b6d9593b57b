//! Non-interactive selection of differences
//!
//! A [`Selection`] narrows the compared differences to the subset an
//! operator wants applied. Empty criteria select everything.

use schemasync_core::diff::{DifferenceKind, SchemaDifference};
use schemasync_core::model::ObjectKind;
use schemasync_core::specification::{from_fn, BoxedSpecification, Specification, SpecificationExt};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Exact object names; empty means any name
    pub names: Vec<String>,
    /// Object kinds; empty means any kind
    pub object_kinds: Vec<ObjectKind>,
    /// Difference kinds; empty means any
    pub difference_kinds: Vec<DifferenceKind>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_object_kinds(mut self, kinds: Vec<ObjectKind>) -> Self {
        self.object_kinds = kinds;
        self
    }

    pub fn with_difference_kinds(mut self, kinds: Vec<DifferenceKind>) -> Self {
        self.difference_kinds = kinds;
        self
    }

    fn to_spec(&self) -> BoxedSpecification<SchemaDifference> {
        let mut spec = from_fn(|_: &SchemaDifference| true).boxed();
        if !self.names.is_empty() {
            let names = self.names.clone();
            spec = spec
                .and(from_fn(move |d: &SchemaDifference| {
                    names.iter().any(|n| n == d.name())
                }))
                .boxed();
        }
        if !self.object_kinds.is_empty() {
            let kinds = self.object_kinds.clone();
            spec = spec
                .and(from_fn(move |d: &SchemaDifference| {
                    kinds.contains(&d.object_kind())
                }))
                .boxed();
        }
        if !self.difference_kinds.is_empty() {
            let kinds = self.difference_kinds.clone();
            spec = spec
                .and(from_fn(move |d: &SchemaDifference| kinds.contains(&d.kind())))
                .boxed();
        }
        spec
    }

    /// Matching differences, in their original order
    pub fn apply(&self, differences: &[SchemaDifference]) -> Vec<SchemaDifference> {
        let spec = self.to_spec();
        differences
            .iter()
            .filter(|d| spec.is_satisfied_by(d))
            .cloned()
            .collect()
    }
}
