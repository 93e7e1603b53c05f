use crate::artifacts::filter::{CommitFilter, FilterError, IncludeDecision};
use crate::artifacts::objects::commit::Commit;
use regex::Regex;

/// Includes commits whose full message contains a match of a regex
#[derive(Debug, Clone)]
pub struct MessageFilter {
    pattern: Regex,
    stop: bool,
}

impl MessageFilter {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let pattern = Regex::new(pattern).map_err(|err| {
            FilterError::InvalidConfiguration(format!("invalid message pattern: {err}"))
        })?;

        Ok(Self {
            pattern,
            stop: false,
        })
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CommitFilter for MessageFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        IncludeDecision::from_match(self.pattern.is_match(commit.message()), self.stop)
    }

    fn reset(&mut self) {}
}
