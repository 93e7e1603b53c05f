use crate::artifacts::filter::{BoxedFilter, CommitFilter, IncludeDecision};
use crate::artifacts::objects::commit::Commit;

/// Includes a commit only when every child includes it
///
/// Children are evaluated in order and evaluation stops at the first child
/// that excludes; its decision (upgraded by this filter's own stop mode) is
/// the result. An empty AND includes everything.
#[derive(Debug, Clone, Default)]
pub struct AndFilter {
    filters: Vec<BoxedFilter>,
    stop: bool,
}

impl AndFilter {
    pub fn new(filters: Vec<BoxedFilter>) -> Self {
        Self {
            filters,
            stop: false,
        }
    }

    pub fn add(mut self, filter: impl CommitFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl CommitFilter for AndFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        for filter in self.filters.iter_mut() {
            let decision = filter.evaluate(commit);
            if !decision.is_include() {
                return decision.with_stop(self.stop);
            }
        }

        IncludeDecision::Include
    }

    fn reset(&mut self) {
        self.filters.iter_mut().for_each(|filter| filter.reset());
    }

    fn children(&self) -> &[BoxedFilter] {
        &self.filters
    }
}

/// Includes a commit as soon as one child includes it
///
/// When no child includes, the strongest child exclusion is returned, so a
/// child's stop request survives. An empty OR excludes everything.
#[derive(Debug, Clone, Default)]
pub struct OrFilter {
    filters: Vec<BoxedFilter>,
    stop: bool,
}

impl OrFilter {
    pub fn new(filters: Vec<BoxedFilter>) -> Self {
        Self {
            filters,
            stop: false,
        }
    }

    pub fn add(mut self, filter: impl CommitFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }
}

impl CommitFilter for OrFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        let mut strongest = IncludeDecision::Exclude;

        for filter in self.filters.iter_mut() {
            let decision = filter.evaluate(commit);
            if decision.is_include() {
                return IncludeDecision::Include;
            }
            strongest = strongest.max(decision);
        }

        strongest.with_stop(self.stop)
    }

    fn reset(&mut self) {
        self.filters.iter_mut().for_each(|filter| filter.reset());
    }

    fn children(&self) -> &[BoxedFilter] {
        &self.filters
    }
}

/// Inverts include and exclude
///
/// A child's stop request passes through unchanged and an inverted include
/// is a plain `Exclude`: negation never creates a stop.
#[derive(Debug, Clone)]
pub struct NotFilter {
    filter: [BoxedFilter; 1],
}

impl NotFilter {
    pub fn new(filter: BoxedFilter) -> Self {
        Self { filter: [filter] }
    }
}

impl CommitFilter for NotFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        match self.filter[0].evaluate(commit) {
            IncludeDecision::Include => IncludeDecision::Exclude,
            IncludeDecision::Exclude => IncludeDecision::Include,
            IncludeDecision::ExcludeAndStop => IncludeDecision::ExcludeAndStop,
        }
    }

    fn reset(&mut self) {
        self.filter[0].reset();
    }

    fn children(&self) -> &[BoxedFilter] {
        &self.filter
    }
}

/// Includes every commit
#[derive(Debug, Clone, Default)]
pub struct AllFilter;

impl AllFilter {
    pub fn new() -> Self {
        AllFilter
    }
}

impl CommitFilter for AllFilter {
    fn evaluate(&mut self, _commit: &Commit) -> IncludeDecision {
        IncludeDecision::Include
    }

    fn reset(&mut self) {}
}

/// Excludes every commit
#[derive(Debug, Clone, Default)]
pub struct NoneFilter {
    stop: bool,
}

impl NoneFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }
}

impl CommitFilter for NoneFilter {
    fn evaluate(&mut self, _commit: &Commit) -> IncludeDecision {
        IncludeDecision::from_match(false, self.stop)
    }

    fn reset(&mut self) {}
}
