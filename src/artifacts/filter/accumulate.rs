//! Filters that accumulate state over a walk
//!
//! Place them last in an AND so they only see commits the other filters
//! accepted. Their identity state (zero count, empty list) is restored by
//! `reset`, which the walker calls before every walk.

use crate::artifacts::filter::{CommitFilter, IncludeDecision};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Counts the commits it evaluates and includes all of them
#[derive(Debug, Clone, Default)]
pub struct CommitCountFilter {
    count: usize,
}

impl CommitCountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl CommitFilter for CommitCountFilter {
    fn evaluate(&mut self, _commit: &Commit) -> IncludeDecision {
        self.count += 1;
        IncludeDecision::Include
    }

    fn reset(&mut self) {
        self.count = 0;
    }
}

/// Includes the first `limit` commits it evaluates and excludes the rest
///
/// With stop-on-exclude set, each branch of the walk ends once the limit is
/// reached.
#[derive(Debug, Clone)]
pub struct CommitLimitFilter {
    limit: usize,
    seen: usize,
    stop: bool,
}

impl CommitLimitFilter {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: 0,
            stop: false,
        }
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl CommitFilter for CommitLimitFilter {
    fn evaluate(&mut self, _commit: &Commit) -> IncludeDecision {
        self.seen = self.seen.saturating_add(1);
        IncludeDecision::from_match(self.seen <= self.limit, self.stop)
    }

    fn reset(&mut self) {
        self.seen = 0;
    }
}

/// Collects the ids of the commits it evaluates and includes all of them
#[derive(Debug, Clone, Default)]
pub struct CommitListFilter {
    commits: Vec<ObjectId>,
}

impl CommitListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> &[ObjectId] {
        &self.commits
    }
}

impl CommitFilter for CommitListFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        self.commits.push(commit.oid().clone());
        IncludeDecision::Include
    }

    fn reset(&mut self) {
        self.commits.clear();
    }
}
