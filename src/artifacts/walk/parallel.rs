//! Independent walks run concurrently
//!
//! Each job owns its filter tree, so jobs share nothing but the read-only
//! commit graph and an optional cancellation flag.

use crate::artifacts::filter::BoxedFilter;
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::walk::{CancelFlag, RevWalk, SortOrder, WalkError, WalkStatus};
use derive_new::new;
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone, new)]
pub struct WalkJob {
    roots: Vec<ObjectId>,
    filter: BoxedFilter,
    #[new(default)]
    order: SortOrder,
}

impl WalkJob {
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }
}

/// Result of one job, with the filter tree holding its final state
#[derive(Debug)]
pub struct WalkOutcome {
    pub result: Result<Vec<Commit>, WalkError>,
    pub status: WalkStatus,
    pub filter: BoxedFilter,
}

/// Run every job on the rayon pool, returning outcomes in job order
pub fn walk_all<G>(graph: &G, jobs: Vec<WalkJob>, cancel: &CancelFlag) -> Vec<WalkOutcome>
where
    G: CommitGraph + Sync + ?Sized,
{
    debug!(jobs = jobs.len(), "starting parallel walks");

    jobs.into_par_iter()
        .map(|job| {
            let mut walk = RevWalk::new(graph, job.filter)
                .with_order(job.order)
                .with_cancel_flag(cancel.clone());
            let result = walk.walk(&job.roots);
            let status = walk.status();

            WalkOutcome {
                result,
                status,
                filter: walk.into_filter(),
            }
        })
        .collect()
}

/// One job per root, each with its own copy of `filter`
pub fn walk_each_root<G>(
    graph: &G,
    roots: &[ObjectId],
    filter: &BoxedFilter,
    order: SortOrder,
    cancel: &CancelFlag,
) -> Vec<WalkOutcome>
where
    G: CommitGraph + Sync + ?Sized,
{
    let jobs = roots
        .iter()
        .map(|root| WalkJob::new(vec![root.clone()], filter.clone()).with_order(order))
        .collect();

    walk_all(graph, jobs, cancel)
}
