use crate::areas::repository::Repository;
use crate::artifacts::filter::{CommitCountFilter, find_filter};
use crate::commands::porcelain::rev_options::{FilterOptions, RevisionOptions};
use derive_new::new;
use std::io::Write;

#[derive(Debug, Clone, Default, new)]
pub struct CountOptions {
    pub revisions: RevisionOptions,
    pub filters: FilterOptions,
}

impl Repository {
    /// Print how many commits the filters select
    ///
    /// Counting is done by a `CommitCountFilter` placed behind every other
    /// filter, so it only sees commits the rest of the tree accepted.
    pub fn count(&self, opts: &CountOptions, writer: &mut dyn Write) -> anyhow::Result<usize> {
        let filter = opts.filters.build_filter()?.add(CommitCountFilter::new());
        let roots = self.resolve_roots(&opts.revisions)?;

        let mut walk = self.rev_walk(&opts.revisions, Box::new(filter));
        walk.walk(&roots)?;

        let count = find_filter::<CommitCountFilter>(walk.filter())
            .map(CommitCountFilter::count)
            .unwrap_or_default();
        writeln!(writer, "{count}")?;

        Ok(count)
    }
}
