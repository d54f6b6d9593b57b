//! Boolean specification combinators
//!
//! A [`Specification`] is a predicate over a candidate value. Leaves are
//! closures ([`from_fn`]); [`And`], [`Or`] and [`Not`] compose them;
//! [`Project`] and [`AnyOf`] evaluate a specification against a property of
//! the candidate (a single optional value, or each element of a slice).
//!
//! Specifications are plain values, so a rule list can be built, stored, and
//! evaluated in order without a chain of conditionals.
//!
//! # Example
//!
//! ```
//! use schemasync_core::specification::{from_fn, Specification, SpecificationExt};
//!
//! let even = from_fn(|n: &i32| n % 2 == 0);
//! let positive = from_fn(|n: &i32| *n > 0);
//! let spec = even.and(positive);
//!
//! assert!(spec.is_satisfied_by(&4));
//! assert!(!spec.is_satisfied_by(&-4));
//! ```

use std::marker::PhantomData;

/// A predicate over candidates of type `T`
pub trait Specification<T: ?Sized> {
    fn is_satisfied_by(&self, candidate: &T) -> bool;
}

/// Type-erased, shareable specification
pub type BoxedSpecification<T> = Box<dyn Specification<T> + Send + Sync>;

impl<T: ?Sized> Specification<T> for Box<dyn Specification<T> + Send + Sync> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (**self).is_satisfied_by(candidate)
    }
}

/// Leaf specification backed by a closure
#[derive(Clone, Copy)]
pub struct FnSpec<F>(F);

impl<T: ?Sized, F> Specification<T> for FnSpec<F>
where
    F: Fn(&T) -> bool,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.0)(candidate)
    }
}

/// Build a leaf specification from a closure
pub fn from_fn<T: ?Sized, F>(predicate: F) -> FnSpec<F>
where
    F: Fn(&T) -> bool,
{
    FnSpec(predicate)
}

/// Satisfied when both sides are (right side short-circuits)
#[derive(Clone, Copy)]
pub struct And<A, B> {
    left: A,
    right: B,
}

impl<T: ?Sized, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

/// Satisfied when either side is (right side short-circuits)
#[derive(Clone, Copy)]
pub struct Or<A, B> {
    left: A,
    right: B,
}

impl<T: ?Sized, A, B> Specification<T> for Or<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

/// Satisfied when the inner specification is not
#[derive(Clone, Copy)]
pub struct Not<A> {
    inner: A,
}

impl<T: ?Sized, A> Specification<T> for Not<A>
where
    A: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

/// Evaluate `inner` against a projected property; unsatisfied when the property is absent
pub struct Project<F, S, U: ?Sized> {
    projection: F,
    inner: S,
    _marker: PhantomData<fn(&U)>,
}

impl<T: ?Sized, U: ?Sized, F, S> Specification<T> for Project<F, S, U>
where
    F: Fn(&T) -> Option<&U>,
    S: Specification<U>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.projection)(candidate)
            .map(|value| self.inner.is_satisfied_by(value))
            .unwrap_or(false)
    }
}

/// Project `candidate` onto an optional property and test `inner` on it
pub fn project<T: ?Sized, U: ?Sized, F, S>(projection: F, inner: S) -> Project<F, S, U>
where
    F: Fn(&T) -> Option<&U>,
    S: Specification<U>,
{
    Project {
        projection,
        inner,
        _marker: PhantomData,
    }
}

/// Satisfied when any element of a projected slice satisfies `inner`
pub struct AnyOf<F, S, U> {
    projection: F,
    inner: S,
    _marker: PhantomData<fn(&U)>,
}

impl<T: ?Sized, U, F, S> Specification<T> for AnyOf<F, S, U>
where
    F: Fn(&T) -> &[U],
    S: Specification<U>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.projection)(candidate)
            .iter()
            .any(|item| self.inner.is_satisfied_by(item))
    }
}

/// Project `candidate` onto a slice and test `inner` on each element
pub fn any_of<T: ?Sized, U, F, S>(projection: F, inner: S) -> AnyOf<F, S, U>
where
    F: Fn(&T) -> &[U],
    S: Specification<U>,
{
    AnyOf {
        projection,
        inner,
        _marker: PhantomData,
    }
}

/// Combinator methods available on every specification
pub trait SpecificationExt<T: ?Sized>: Specification<T> + Sized {
    fn and<S: Specification<T>>(self, other: S) -> And<Self, S> {
        And {
            left: self,
            right: other,
        }
    }

    fn or<S: Specification<T>>(self, other: S) -> Or<Self, S> {
        Or {
            left: self,
            right: other,
        }
    }

    fn not(self) -> Not<Self> {
        Not { inner: self }
    }

    fn boxed(self) -> BoxedSpecification<T>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }
}

impl<T: ?Sized, S: Specification<T>> SpecificationExt<T> for S {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Batch {
        label: String,
        items: Vec<i32>,
        parent: Option<Box<Batch>>,
    }

    fn batch(label: &str, items: Vec<i32>) -> Batch {
        Batch {
            label: label.to_string(),
            items,
            parent: None,
        }
    }

    #[test]
    fn test_and_or_not() {
        let even = from_fn(|n: &i32| n % 2 == 0);
        let big = from_fn(|n: &i32| *n > 10);

        assert!(even.and(big).is_satisfied_by(&12));
        assert!(!even.and(big).is_satisfied_by(&8));
        assert!(even.or(big).is_satisfied_by(&8));
        assert!(even.or(big).is_satisfied_by(&11));
        assert!(!even.or(big).is_satisfied_by(&7));
        assert!(even.not().is_satisfied_by(&7));
    }

    #[test]
    fn test_any_of_projects_onto_elements() {
        let has_negative = any_of(|b: &Batch| b.items.as_slice(), from_fn(|n: &i32| *n < 0));
        assert!(has_negative.is_satisfied_by(&batch("a", vec![1, -2, 3])));
        assert!(!has_negative.is_satisfied_by(&batch("b", vec![1, 2])));
        assert!(!has_negative.is_satisfied_by(&batch("c", vec![])));
    }

    #[test]
    fn test_project_unsatisfied_when_absent() {
        let parent_is_root = project(
            |b: &Batch| b.parent.as_deref(),
            from_fn(|p: &Batch| p.label == "root"),
        );
        let mut child = batch("child", vec![]);
        assert!(!parent_is_root.is_satisfied_by(&child));
        child.parent = Some(Box::new(batch("root", vec![])));
        assert!(parent_is_root.is_satisfied_by(&child));
    }

    #[test]
    fn test_boxed_specifications_compose() {
        let small: BoxedSpecification<i32> = from_fn(|n: &i32| *n < 5).boxed();
        let odd: BoxedSpecification<i32> = from_fn(|n: &i32| n % 2 == 1).boxed();
        let spec = small.and(odd).boxed();
        assert!(spec.is_satisfied_by(&3));
        assert!(!spec.is_satisfied_by(&4));
        assert!(!spec.is_satisfied_by(&7));
    }
}
