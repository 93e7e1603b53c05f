use crate::CommitDisplayFormat;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::commands::porcelain::rev_options::{FilterOptions, RevisionOptions};
use colored::Colorize;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub revisions: RevisionOptions,
    pub filters: FilterOptions,
    pub oneline: bool,
    pub abbrev_commit: bool,
    pub format: CommitDisplayFormat,
}

impl LogOptions {
    fn display_format(&self) -> CommitDisplayFormat {
        if self.oneline {
            CommitDisplayFormat::OneLine
        } else {
            self.format
        }
    }

    fn abbreviate(&self) -> bool {
        self.oneline || self.abbrev_commit
    }
}

impl Repository {
    /// Print the commits selected by `opts`
    ///
    /// When the walk aborts on a missing commit, the commits found so far are
    /// still printed before the error is returned.
    pub fn log(&self, opts: &LogOptions, writer: &mut dyn Write) -> anyhow::Result<()> {
        let filter = opts.filters.build_filter()?;
        let roots = self.resolve_roots(&opts.revisions)?;

        let mut walk = self.rev_walk(&opts.revisions, Box::new(filter));
        let outcome = walk.walk(&roots);
        let commits = match &outcome {
            Ok(commits) => commits.as_slice(),
            Err(err) => err.partial(),
        };
        debug!(commits = commits.len(), status = ?walk.status(), "log walk finished");

        for (index, commit) in commits.iter().enumerate() {
            self.display_commit(writer, commit, opts, index == 0)?;
        }
        writer.flush()?;

        outcome?;
        Ok(())
    }

    pub fn display_commit(
        &self,
        writer: &mut dyn Write,
        commit: &Commit,
        opts: &LogOptions,
        first: bool,
    ) -> anyhow::Result<()> {
        match opts.display_format() {
            CommitDisplayFormat::Medium => {
                if !first {
                    writeln!(writer)?;
                }
                self.show_commit_medium(writer, commit, opts.abbreviate())
            }
            CommitDisplayFormat::OneLine => {
                self.show_commit_oneline(writer, commit, opts.abbreviate())
            }
        }
    }

    fn show_commit_medium(
        &self,
        writer: &mut dyn Write,
        commit: &Commit,
        abbrev_commit: bool,
    ) -> anyhow::Result<()> {
        writeln!(
            writer,
            "{}",
            format!("commit {}", Self::abbrev_commit_id(commit, abbrev_commit)).yellow()
        )?;
        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(writer, "Merge: {}", parents)?;
        }
        writeln!(writer, "Author: {}", commit.author().display_name())?;
        writeln!(writer, "Date:   {}", commit.author().readable_timestamp())?;
        writeln!(writer)?;
        for message_line in commit.message().lines() {
            writeln!(writer, "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(
        &self,
        writer: &mut dyn Write,
        commit: &Commit,
        abbrev_commit: bool,
    ) -> anyhow::Result<()> {
        writeln!(
            writer,
            "{} {}",
            Self::abbrev_commit_id(commit, abbrev_commit).yellow(),
            commit.short_message()
        )?;

        Ok(())
    }

    fn abbrev_commit_id(commit: &Commit, abbrev_commit: bool) -> String {
        if abbrev_commit {
            commit.oid().to_short_oid()
        } else {
            commit.oid().to_string()
        }
    }
}
