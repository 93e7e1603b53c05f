use crate::areas::database::Database;
use crate::artifacts::graph::GraphError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{TreeEntry, TreeEntryMap};
use std::collections::BTreeSet;

/// Slash-separated paths of files that differ between two trees
pub type ChangedPaths = BTreeSet<String>;

/// Recursive comparison of two trees by entry id
///
/// Subtrees with equal ids are never inflated, so the cost follows the size
/// of the change rather than the size of the tree.
#[derive(Debug)]
pub struct TreeDiff<'r> {
    database: &'r Database,
    changed_paths: ChangedPaths,
}

impl<'r> TreeDiff<'r> {
    pub fn new(database: &'r Database) -> Self {
        TreeDiff {
            database,
            changed_paths: BTreeSet::new(),
        }
    }

    pub fn changed_paths(&self) -> &ChangedPaths {
        &self.changed_paths
    }

    pub fn into_changed_paths(self) -> ChangedPaths {
        self.changed_paths
    }

    pub fn compare_oids(
        &mut self,
        old: Option<&ObjectId>,
        new: Option<&ObjectId>,
        prefix: &str,
    ) -> Result<(), GraphError> {
        if old == new {
            return Ok(());
        }

        let old_tree_entries = self.inflate_oid_to_tree_entries(old)?;
        let new_tree_entries = self.inflate_oid_to_tree_entries(new)?;

        self.detect_deletions(&old_tree_entries, &new_tree_entries, prefix)?;
        self.detect_additions(&old_tree_entries, &new_tree_entries, prefix)?;

        Ok(())
    }

    fn inflate_oid_to_tree_entries(
        &self,
        oid: Option<&ObjectId>,
    ) -> Result<TreeEntryMap, GraphError> {
        match oid {
            None => Ok(TreeEntryMap::new()),
            Some(oid) => Ok(self.database.parse_tree(oid)?.into_entries()),
        }
    }

    /// Entries removed or modified on the way from `old` to `new`
    fn detect_deletions(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &str,
    ) -> Result<(), GraphError> {
        for (name, entry) in old {
            let other = new.get(name);
            if other == Some(entry) {
                continue;
            }

            let path = Self::join(prefix, name);
            self.compare_oids(Self::tree_oid(Some(entry)), Self::tree_oid(other), &path)?;

            let old_is_file = !entry.is_tree();
            let new_is_file = other.is_some_and(|other| !other.is_tree());
            if old_is_file || new_is_file {
                self.changed_paths.insert(path);
            }
        }

        Ok(())
    }

    /// Entries present only in `new`
    fn detect_additions(
        &mut self,
        old: &TreeEntryMap,
        new: &TreeEntryMap,
        prefix: &str,
    ) -> Result<(), GraphError> {
        for (name, entry) in new {
            if old.contains_key(name) {
                continue;
            }

            let path = Self::join(prefix, name);
            if entry.is_tree() {
                self.compare_oids(None, Some(&entry.oid), &path)?;
            } else {
                self.changed_paths.insert(path);
            }
        }

        Ok(())
    }

    fn tree_oid(entry: Option<&TreeEntry>) -> Option<&ObjectId> {
        entry.filter(|entry| entry.is_tree()).map(|entry| &entry.oid)
    }

    fn join(prefix: &str, name: &str) -> String {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        }
    }
}
