use crate::artifacts::filter::{CommitFilter, FilterError, IncludeDecision};
use crate::artifacts::objects::commit::Commit;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Which timestamp of a commit a date filter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DateField {
    Author,
    #[default]
    Committer,
}

/// Includes commits dated within an inclusive range
///
/// Either bound may be open, not both. Combined with stop-on-exclude, a
/// `since` bound ends each branch of the walk at the first older commit.
#[derive(Debug, Clone)]
pub struct DateRangeFilter {
    field: DateField,
    since: Option<DateTime<FixedOffset>>,
    until: Option<DateTime<FixedOffset>>,
    stop: bool,
}

impl DateRangeFilter {
    pub fn new(
        field: DateField,
        since: Option<DateTime<FixedOffset>>,
        until: Option<DateTime<FixedOffset>>,
    ) -> Result<Self, FilterError> {
        match (since, until) {
            (None, None) => {
                return Err(FilterError::InvalidConfiguration(
                    "date range needs a since or an until bound".to_string(),
                ));
            }
            (Some(since), Some(until)) if since > until => {
                return Err(FilterError::InvalidConfiguration(format!(
                    "date range starts at {since} after it ends at {until}"
                )));
            }
            _ => {}
        }

        Ok(Self {
            field,
            since,
            until,
            stop: false,
        })
    }

    pub fn since(field: DateField, since: DateTime<FixedOffset>) -> Result<Self, FilterError> {
        Self::new(field, Some(since), None)
    }

    pub fn until(field: DateField, until: DateTime<FixedOffset>) -> Result<Self, FilterError> {
        Self::new(field, None, Some(until))
    }

    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    fn in_range(&self, when: DateTime<FixedOffset>) -> bool {
        self.since.is_none_or(|since| when >= since) && self.until.is_none_or(|until| when <= until)
    }
}

impl CommitFilter for DateRangeFilter {
    fn evaluate(&mut self, commit: &Commit) -> IncludeDecision {
        let when = match self.field {
            DateField::Author => commit.author().timestamp(),
            DateField::Committer => commit.committer().timestamp(),
        };

        IncludeDecision::from_match(self.in_range(when), self.stop)
    }

    fn reset(&mut self) {}
}

/// Parse a user supplied date
///
/// Accepts RFC 3339, RFC 2822, `%Y-%m-%d %H:%M:%S %z`, and bare
/// `%Y-%m-%d` (midnight UTC).
pub fn parse_date(value: &str) -> Result<DateTime<FixedOffset>, FilterError> {
    let value = value.trim();

    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive: NaiveDateTime| naive.and_utc().fixed_offset())
        })
        .ok_or_else(|| FilterError::InvalidConfiguration(format!("unrecognized date {value}")))
}
