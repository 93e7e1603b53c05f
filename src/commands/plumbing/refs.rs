use crate::areas::repository::Repository;
use crate::artifacts::graph::CommitGraph;
use std::io::Write;

impl Repository {
    /// Print `<oid> <refname>` for every ref, tags peeled to commits
    pub fn show_refs(&self, writer: &mut dyn Write) -> anyhow::Result<()> {
        for (name, oid) in CommitGraph::refs(self)? {
            writeln!(writer, "{oid} {name}")?;
        }

        Ok(())
    }
}
