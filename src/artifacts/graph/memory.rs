use crate::artifacts::graph::{CommitGraph, GraphError};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, HashMap};

/// Commit graph held entirely in memory
///
/// Parents are not required to exist: a dangling parent id is reported as
/// `GraphError::NotFound` when the walker reaches it.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommitGraph {
    commits: HashMap<ObjectId, Commit>,
    refs: BTreeMap<String, ObjectId>,
}

impl InMemoryCommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, commit: Commit) {
        self.commits.insert(commit.oid().clone(), commit);
    }

    pub fn set_ref(&mut self, name: impl Into<String>, oid: ObjectId) {
        self.refs.insert(name.into(), oid);
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

impl FromIterator<Commit> for InMemoryCommitGraph {
    fn from_iter<I: IntoIterator<Item = Commit>>(iter: I) -> Self {
        let mut graph = Self::new();
        for commit in iter {
            graph.insert(commit);
        }
        graph
    }
}

impl CommitGraph for InMemoryCommitGraph {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, GraphError> {
        self.commits
            .get(oid)
            .cloned()
            .ok_or_else(|| GraphError::NotFound(oid.clone()))
    }

    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError> {
        self.commits
            .get(oid)
            .map(|commit| commit.parents().to_vec())
            .ok_or_else(|| GraphError::NotFound(oid.clone()))
    }

    fn refs(&self) -> Result<BTreeMap<String, ObjectId>, GraphError> {
        Ok(self.refs.clone())
    }
}
