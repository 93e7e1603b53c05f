use crate::areas::repository::Repository;
use crate::artifacts::filter::date::parse_date;
use crate::artifacts::filter::{
    AndFilter, AuthorFilter, BoxedFilter, CommitLimitFilter, CommitterFilter, DateField,
    DateRangeFilter, MessageFilter, NotFilter, ParentCountFilter, PathFilter,
};
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::{RevWalk, SortOrder};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// Where a history query starts and in which order it walks
#[derive(Debug, Clone, Default)]
pub struct RevisionOptions {
    pub revisions: Vec<String>,
    pub all: bool,
    pub topo_order: bool,
}

impl RevisionOptions {
    pub fn order(&self) -> SortOrder {
        if self.topo_order {
            SortOrder::Topological
        } else {
            SortOrder::Date
        }
    }
}

/// Commit selection flags, ANDed together in the order listed
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub committer: Option<String>,
    pub committer_email: Option<String>,
    pub grep: Option<String>,
    pub invert_grep: bool,
    pub since: Option<String>,
    pub until: Option<String>,
    pub date_field: DateField,
    pub merges: bool,
    pub no_merges: bool,
    pub max_count: Option<usize>,
    pub stop_on_exclude: bool,
    pub paths: Vec<PathBuf>,
}

impl FilterOptions {
    pub fn needs_changed_paths(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Build the root AND of the filter tree
    ///
    /// The commit limit goes last so it only counts commits every other
    /// filter accepted.
    pub fn build_filter(&self) -> anyhow::Result<AndFilter> {
        let mut filter = AndFilter::default().with_stop(self.stop_on_exclude);

        if self.author.is_some() || self.author_email.is_some() {
            filter = filter.add(Self::identity_filter(
                AuthorFilter::name,
                AuthorFilter::email,
                AuthorFilter::identity,
                self.author.as_deref(),
                self.author_email.as_deref(),
            ));
        }
        if self.committer.is_some() || self.committer_email.is_some() {
            filter = filter.add(Self::identity_filter(
                CommitterFilter::name,
                CommitterFilter::email,
                CommitterFilter::identity,
                self.committer.as_deref(),
                self.committer_email.as_deref(),
            ));
        }

        if let Some(pattern) = &self.grep {
            let message = MessageFilter::new(pattern)?;
            filter = if self.invert_grep {
                filter.add(NotFilter::new(Box::new(message)))
            } else {
                filter.add(message)
            };
        } else if self.invert_grep {
            anyhow::bail!("--invert-grep requires --grep");
        }

        if self.since.is_some() || self.until.is_some() {
            let since = self.since.as_deref().map(parse_date).transpose()?;
            let until = self.until.as_deref().map(parse_date).transpose()?;
            filter = filter.add(DateRangeFilter::new(self.date_field, since, until)?);
        }

        match (self.merges, self.no_merges) {
            (true, true) => anyhow::bail!("--merges and --no-merges are mutually exclusive"),
            (true, false) => filter = filter.add(ParentCountFilter::merges()),
            (false, true) => filter = filter.add(ParentCountFilter::non_merges()),
            (false, false) => {}
        }

        if !self.paths.is_empty() {
            filter = filter.add(PathFilter::new(self.paths.clone())?);
        }

        if let Some(limit) = self.max_count {
            filter = filter.add(CommitLimitFilter::new(limit).with_stop(true));
        }

        Ok(filter)
    }

    fn identity_filter<F>(
        by_name: fn(Option<&str>) -> F,
        by_email: fn(Option<&str>) -> F,
        by_identity: fn(Option<&str>, Option<&str>) -> F,
        name: Option<&str>,
        email: Option<&str>,
    ) -> F {
        match (name, email) {
            (Some(_), Some(_)) => by_identity(name, email),
            (Some(_), None) => by_name(name),
            (None, _) => by_email(email),
        }
    }
}

impl Repository {
    /// Commits the walk starts from, deduplicated in argument order
    ///
    /// Without revisions or `--all` the walk starts at HEAD; an unborn HEAD
    /// yields no roots.
    pub fn resolve_roots(&self, revisions: &RevisionOptions) -> anyhow::Result<Vec<ObjectId>> {
        let mut roots = revisions
            .revisions
            .iter()
            .map(|revision| self.resolve_revision(revision))
            .collect::<anyhow::Result<Vec<_>>>()?;

        if revisions.all {
            roots.extend(CommitGraph::refs(self)?.into_values());
        } else if roots.is_empty() {
            match self.refs().read_head()? {
                Some(head) => roots.push(self.resolve_revision(head.as_ref())?),
                None => {
                    debug!(branch = %self.refs().current_ref()?, "unborn HEAD, nothing to walk")
                }
            }
        }

        let mut distinct = HashSet::new();
        roots.retain(|root| distinct.insert(root.clone()));

        Ok(roots)
    }

    pub fn rev_walk(&self, revisions: &RevisionOptions, filter: BoxedFilter) -> RevWalk<'_, Self> {
        RevWalk::new(self, filter).with_order(revisions.order())
    }
}
