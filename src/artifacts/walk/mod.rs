//! Filtered commit history traversal
//!
//! [`RevWalk`] walks the commit graph from one or more roots, feeding every
//! commit to a filter tree and collecting the included ones.
//!
//! ## Orders
//!
//! - [`SortOrder::Date`]: a priority queue ordered by commit timestamp
//!   (newest first, ties in insertion order), like `git log`.
//! - [`SortOrder::Topological`]: children always come before their parents.
//!   A first pass counts, for every reachable commit, how many children
//!   point at it; a commit becomes ready once all of them were processed.
//!   Ready commits are taken newest first.
//!
//! ## Stopping
//!
//! A filter answering [`IncludeDecision::ExcludeAndStop`] prunes the
//! ancestors of that one commit: its parents are not queued through it, but
//! commits already queued are still visited, and a parent that is also
//! reachable through a non-pruned child is still visited.
//!
//! ## States
//!
//! ```text
//! Idle --walk--> Walking --frontier exhausted--> Done
//!                   |
//!                   +--stop / cancel / error--> Stopped
//! ```
//!
//! A walk that pruned a branch ends `Stopped` even if it then drained the
//! rest of its frontier.

pub mod parallel;
#[cfg(test)]
mod properties;

use crate::artifacts::filter::{BoxedFilter, CommitFilter, IncludeDecision};
use crate::artifacts::graph::{CommitGraph, GraphError};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use thiserror::Error;
use tracing::{debug, trace, warn};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct CommitMarks: u8 {
        /// Queued (or visited) once; never queued again
        const SEEN = 0b001;
        /// Some non-pruned child, or the caller, leads to this commit
        const REACHED = 0b010;
        /// The graph has no such commit
        const MISSING = 0b100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortOrder {
    /// Reverse chronological by commit timestamp
    #[default]
    Date,
    /// Children before parents, newest first among ready commits
    Topological,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkStatus {
    #[default]
    Idle,
    Walking,
    Stopped,
    Done,
}

/// Shared cooperative cancellation flag
///
/// Checked by the walker before visiting each commit.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// A walk aborted by the commit graph
///
/// Commits emitted before the failure stay available through
/// [`WalkError::partial`].
#[derive(Debug, Error)]
#[error("walk aborted after {} commits: {source}", .partial.len())]
pub struct WalkError {
    source: GraphError,
    partial: Vec<Commit>,
}

impl WalkError {
    pub fn graph_error(&self) -> &GraphError {
        &self.source
    }

    pub fn partial(&self) -> &[Commit] {
        &self.partial
    }

    pub fn into_partial(self) -> Vec<Commit> {
        self.partial
    }
}

#[derive(Debug)]
struct QueueEntry {
    timestamp: DateTime<FixedOffset>,
    sequence: u64,
    commit: Commit,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // max-heap: newest first, then earliest queued
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Transient state owned by a single walk
#[derive(Debug, Default)]
struct WalkState {
    marks: HashMap<ObjectId, CommitMarks>,
    queue: BinaryHeap<QueueEntry>,
    results: Vec<Commit>,
    sequence: u64,
}

impl WalkState {
    /// Set `flag` on `oid`, returning whether it was newly set
    fn mark(&mut self, oid: &ObjectId, flag: CommitMarks) -> bool {
        let marks = self.marks.entry(oid.clone()).or_default();
        let newly_set = !marks.contains(flag);
        marks.insert(flag);
        newly_set
    }

    fn has(&self, oid: &ObjectId, flag: CommitMarks) -> bool {
        self.marks
            .get(oid)
            .is_some_and(|marks| marks.contains(flag))
    }

    fn push(&mut self, commit: Commit) {
        self.sequence += 1;
        self.queue.push(QueueEntry {
            timestamp: commit.timestamp(),
            sequence: self.sequence,
            commit,
        });
    }
}

/// Child counts and parent lists of every commit reachable from the roots
#[derive(Debug, Default)]
struct TopoIndex {
    pending_children: HashMap<ObjectId, usize>,
    parents: HashMap<ObjectId, Vec<ObjectId>>,
}

impl TopoIndex {
    fn insert(&mut self, oid: ObjectId, parents: Vec<ObjectId>, frontier: &mut Vec<ObjectId>) {
        for parent in &parents {
            *self.pending_children.entry(parent.clone()).or_default() += 1;
            frontier.push(parent.clone());
        }
        self.parents.insert(oid, parents);
    }

    fn parents(&self, oid: &ObjectId) -> &[ObjectId] {
        self.parents.get(oid).map(Vec::as_slice).unwrap_or_default()
    }

    /// Account for one processed child, returning whether `oid` is now ready
    fn release(&mut self, oid: &ObjectId) -> bool {
        match self.pending_children.get_mut(oid) {
            Some(pending) => {
                *pending = pending.saturating_sub(1);
                *pending == 0
            }
            None => true,
        }
    }

    fn is_ready(&self, oid: &ObjectId) -> bool {
        self.pending_children.get(oid).is_none_or(|pending| *pending == 0)
    }
}

pub struct RevWalk<'g, G: CommitGraph + ?Sized> {
    graph: &'g G,
    filter: BoxedFilter,
    order: SortOrder,
    cancel: CancelFlag,
    status: WalkStatus,
}

impl<'g, G: CommitGraph + ?Sized> RevWalk<'g, G> {
    pub fn new(graph: &'g G, filter: BoxedFilter) -> Self {
        Self {
            graph,
            filter,
            order: SortOrder::default(),
            cancel: CancelFlag::default(),
            status: WalkStatus::Idle,
        }
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn status(&self) -> WalkStatus {
        self.status
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Root of the filter tree, holding the state of the last walk
    pub fn filter(&self) -> &dyn CommitFilter {
        self.filter.as_ref()
    }

    pub fn into_filter(self) -> BoxedFilter {
        self.filter
    }

    /// Walk from every ref target of the graph
    pub fn walk_refs(&mut self) -> Result<Vec<Commit>, WalkError> {
        let refs = self.graph.refs().map_err(|source| WalkError {
            source,
            partial: Vec::new(),
        })?;

        let mut roots = Vec::new();
        let mut distinct = HashSet::new();
        for oid in refs.into_values() {
            if distinct.insert(oid.clone()) {
                roots.push(oid);
            }
        }

        self.walk(&roots)
    }

    /// Run one independent walk from `roots`
    ///
    /// The filter tree is reset first, so a walk never sees state left over
    /// from a previous one.
    pub fn walk(&mut self, roots: &[ObjectId]) -> Result<Vec<Commit>, WalkError> {
        self.filter.reset();
        self.status = WalkStatus::Walking;
        debug!(roots = roots.len(), order = ?self.order, "starting walk");

        let mut state = WalkState::default();
        let outcome = match self.order {
            SortOrder::Date => self.walk_by_date(roots, &mut state),
            SortOrder::Topological => self.walk_topologically(roots, &mut state),
        };

        match outcome {
            Ok(()) => {
                if self.status == WalkStatus::Walking {
                    self.status = WalkStatus::Done;
                }
                debug!(
                    emitted = state.results.len(),
                    status = ?self.status,
                    "walk finished"
                );
                Ok(state.results)
            }
            Err(source) => {
                self.status = WalkStatus::Stopped;
                warn!(
                    error = %source,
                    emitted = state.results.len(),
                    "walk aborted"
                );
                Err(WalkError {
                    source,
                    partial: state.results,
                })
            }
        }
    }

    fn walk_by_date(&mut self, roots: &[ObjectId], state: &mut WalkState) -> Result<(), GraphError> {
        for root in roots {
            if state.mark(root, CommitMarks::SEEN) {
                state.push(self.graph.commit(root)?);
            }
        }

        while let Some(entry) = state.queue.pop() {
            if self.is_cancelled() {
                return Ok(());
            }

            let parents = entry.commit.parents().to_vec();
            if !self.visit(entry.commit, state) {
                continue;
            }

            for parent in &parents {
                if state.mark(parent, CommitMarks::SEEN) {
                    state.push(self.graph.commit(parent)?);
                }
            }
        }

        Ok(())
    }

    fn walk_topologically(
        &mut self,
        roots: &[ObjectId],
        state: &mut WalkState,
    ) -> Result<(), GraphError> {
        let mut index = self.index_reachable(roots, state)?;

        for root in roots {
            state.mark(root, CommitMarks::REACHED);
        }
        for root in roots {
            if index.is_ready(root) && state.mark(root, CommitMarks::SEEN) {
                state.push(self.graph.commit(root)?);
            }
        }

        while let Some(entry) = state.queue.pop() {
            if self.is_cancelled() {
                return Ok(());
            }

            let parents = entry.commit.parents().to_vec();
            let descend = self.visit(entry.commit, state);

            for parent in &parents {
                if state.has(parent, CommitMarks::MISSING) {
                    if descend {
                        return Err(GraphError::NotFound(parent.clone()));
                    }
                    continue;
                }
                if descend {
                    state.mark(parent, CommitMarks::REACHED);
                }
                self.release(parent, &mut index, state)?;
            }
        }

        Ok(())
    }

    /// Count children of every commit reachable from `roots`
    ///
    /// Unknown ancestors are only marked missing here; the walk fails when
    /// it actually needs one.
    fn index_reachable(
        &self,
        roots: &[ObjectId],
        state: &mut WalkState,
    ) -> Result<TopoIndex, GraphError> {
        let mut index = TopoIndex::default();
        let mut frontier = Vec::new();

        for root in roots {
            if !index.parents.contains_key(root) {
                let parents = self.graph.parents(root)?;
                index.insert(root.clone(), parents, &mut frontier);
            }
        }

        while let Some(oid) = frontier.pop() {
            if index.parents.contains_key(&oid) || state.has(&oid, CommitMarks::MISSING) {
                continue;
            }

            match self.graph.parents(&oid) {
                Ok(parents) => index.insert(oid, parents, &mut frontier),
                Err(GraphError::NotFound(_)) => {
                    state.mark(&oid, CommitMarks::MISSING);
                }
                Err(err) => return Err(err),
            }
        }

        trace!(commits = index.parents.len(), "indexed reachable commits");
        Ok(index)
    }

    /// Account for one processed child of `oid`
    ///
    /// A commit whose children are all done is queued when reached, or
    /// else passed over, releasing its own parents in turn.
    fn release(
        &self,
        oid: &ObjectId,
        index: &mut TopoIndex,
        state: &mut WalkState,
    ) -> Result<(), GraphError> {
        let mut pending = vec![oid.clone()];

        while let Some(oid) = pending.pop() {
            if !index.release(&oid) {
                continue;
            }

            if state.has(&oid, CommitMarks::REACHED) {
                if state.mark(&oid, CommitMarks::SEEN) {
                    state.push(self.graph.commit(&oid)?);
                }
            } else if state.mark(&oid, CommitMarks::SEEN) {
                trace!(commit = %oid, "pruned");
                pending.extend(
                    index
                        .parents(&oid)
                        .iter()
                        .filter(|parent| !state.has(parent, CommitMarks::MISSING))
                        .cloned(),
                );
            }
        }

        Ok(())
    }

    /// Evaluate the filter on a commit, returning whether to descend
    fn visit(&mut self, commit: Commit, state: &mut WalkState) -> bool {
        let decision = self.filter.evaluate(&commit);
        trace!(commit = %commit.oid(), ?decision, "visited");

        match decision {
            IncludeDecision::Include => {
                state.results.push(commit);
                true
            }
            IncludeDecision::Exclude => true,
            IncludeDecision::ExcludeAndStop => {
                self.status = WalkStatus::Stopped;
                false
            }
        }
    }

    fn is_cancelled(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            debug!("walk cancelled");
            self.status = WalkStatus::Stopped;
            return true;
        }
        false
    }
}
