//! Composable commit filters
//!
//! A filter tree decides, per commit, whether the walker should emit it and
//! whether it should keep walking that commit's ancestors:
//!
//! - `combinator`: AND / OR / NOT and the constant filters
//! - `person`: author and committer identity matching
//! - `message`: commit message regex search
//! - `path`: commits touching given files or directories
//! - `date`: author or committer date ranges
//! - `parents`: parent count (merges, non-merges)
//! - `accumulate`: stateful count, limit and list filters
//!
//! ## Decisions
//!
//! [`IncludeDecision::ExcludeAndStop`] is a traversal-control value, not an
//! error: it asks the walker not to descend into the excluded commit's
//! parents. Any filter can be put in stop-on-exclude mode, which turns its
//! `Exclude` results into `ExcludeAndStop`.
//!
//! ## State
//!
//! Filters may accumulate state while a walk runs. The walker calls
//! [`CommitFilter::reset`] before every walk and composites forward it to
//! all children, so no state leaks from one walk into the next.

pub mod accumulate;
pub mod combinator;
pub mod date;
pub mod message;
pub mod parents;
pub mod path;
pub mod person;

use crate::artifacts::objects::commit::Commit;
use std::any::Any;
use std::fmt;
use thiserror::Error;

pub use accumulate::{CommitCountFilter, CommitLimitFilter, CommitListFilter};
pub use combinator::{AllFilter, AndFilter, NoneFilter, NotFilter, OrFilter};
pub use date::{DateField, DateRangeFilter};
pub use message::MessageFilter;
pub use parents::ParentCountFilter;
pub use path::PathFilter;
pub use person::{AuthorFilter, CommitterFilter, PersonFilter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid filter configuration: {0}")]
    InvalidConfiguration(String),
}

/// Per-commit verdict of a filter
///
/// Variants are ordered by strength: `ExcludeAndStop` dominates `Exclude`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncludeDecision {
    Include,
    Exclude,
    ExcludeAndStop,
}

impl IncludeDecision {
    /// Map a match result, honoring stop-on-exclude
    pub fn from_match(matched: bool, stop: bool) -> Self {
        if matched {
            IncludeDecision::Include
        } else {
            IncludeDecision::Exclude.with_stop(stop)
        }
    }

    /// Upgrade `Exclude` to `ExcludeAndStop` when `stop` is set
    pub fn with_stop(self, stop: bool) -> Self {
        match self {
            IncludeDecision::Exclude if stop => IncludeDecision::ExcludeAndStop,
            other => other,
        }
    }

    pub fn is_include(self) -> bool {
        self == IncludeDecision::Include
    }

    pub fn is_stop(self) -> bool {
        self == IncludeDecision::ExcludeAndStop
    }
}

/// A node of a filter tree
///
/// `reset` has no default: every filter states explicitly what its identity
/// state is, even when it holds none.
pub trait CommitFilter: FilterClone + Send + fmt::Debug {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision;

    fn reset(&mut self);

    /// Direct children of a composite filter
    fn children(&self) -> &[BoxedFilter] {
        &[]
    }
}

pub type BoxedFilter = Box<dyn CommitFilter>;

/// Deep cloning and downcasting for boxed filters
///
/// Implemented for every `Clone` filter, so independent walks can each own
/// a fresh copy of the same tree.
pub trait FilterClone {
    fn clone_box(&self) -> BoxedFilter;

    fn as_any(&self) -> &dyn Any;
}

impl<T> FilterClone for T
where
    T: CommitFilter + Clone + 'static,
{
    fn clone_box(&self) -> BoxedFilter {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Clone for BoxedFilter {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// Find the first filter of type `T` in a tree, depth-first
///
/// Used to read accumulated state (counts, collected ids) after a walk.
pub fn find_filter<T: CommitFilter + 'static>(root: &dyn CommitFilter) -> Option<&T> {
    if let Some(found) = root.as_any().downcast_ref::<T>() {
        return Some(found);
    }

    root.children()
        .iter()
        .find_map(|child| find_filter::<T>(child.as_ref()))
}

/// Both values absent, or both present and equal by value
pub fn equals<T: PartialEq + ?Sized>(first: Option<&T>, second: Option<&T>) -> bool {
    equals_null(first, second) || equals_non_null(first, second)
}

/// Both values absent
pub fn equals_null<T: ?Sized>(first: Option<&T>, second: Option<&T>) -> bool {
    first.is_none() && second.is_none()
}

/// Both values present and equal by value
pub fn equals_non_null<T: PartialEq + ?Sized>(first: Option<&T>, second: Option<&T>) -> bool {
    matches!((first, second), (Some(first), Some(second)) if first == second)
}
