use crate::artifacts::filter::{CommitFilter, FilterError, IncludeDecision};
use crate::artifacts::objects::commit::Commit;

/// Includes commits whose parent count lies in `[min, max]`
#[derive(Debug, Clone)]
pub struct ParentCountFilter {
    min: usize,
    max: Option<usize>,
    stop: bool,
}

impl ParentCountFilter {
    pub fn new(min: usize, max: Option<usize>) -> Result<Self, FilterError> {
        if let Some(max) = max
            && min > max
        {
            return Err(FilterError::InvalidConfiguration(format!(
                "parent count range {min}..={max} is empty"
            )));
        }

        Ok(Self {
            min,
            max,
            stop: false,
        })
    }

    /// Commits with two or more parents
    pub fn merges() -> Self {
        Self {
            min: 2,
            max: None,
            stop: false,
        }
    }

    /// Commits with at most one parent
    pub fn non_merges() -> Self {
        Self {
            min: 0,
            max: Some(1),
            stop: false,
        }
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }
}

impl CommitFilter for ParentCountFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        let count = commit.parents().len();
        let matched = count >= self.min && self.max.is_none_or(|max| count <= max);

        IncludeDecision::from_match(matched, self.stop)
    }

    fn reset(&mut self) {}
}
