//! Commit graph provider contract
//!
//! The walker never reads storage directly: it asks a [`CommitGraph`] for
//! commits, their parents and the refs that usually seed a walk.
//! Implementations must be safe for concurrent reads when shared between
//! parallel walks (commits are immutable once created).
//!
//! - `memory`: in-memory graph for library users and tests
//! - `crate::areas::repository::Repository`: loose objects of a `.git` directory

pub mod memory;

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("missing object {0}")]
    NotFound(ObjectId),
    #[error("corrupt object {oid}: {reason}")]
    Corrupt { oid: ObjectId, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraphError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound(_))
    }
}

pub trait CommitGraph {
    /// Load a commit, or `GraphError::NotFound` when the id is unknown
    fn commit(&self, oid: &ObjectId) -> Result<Commit, GraphError>;

    /// Ordered parent ids of a commit
    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.commit(oid)?.parents().to_vec())
    }

    /// Ref name to commit id
    fn refs(&self) -> Result<BTreeMap<String, ObjectId>, GraphError>;
}

impl<G: CommitGraph + ?Sized> CommitGraph for &G {
    fn commit(&self, oid: &ObjectId) -> Result<Commit, GraphError> {
        (**self).commit(oid)
    }

    fn parents(&self, oid: &ObjectId) -> Result<Vec<ObjectId>, GraphError> {
        (**self).parents(oid)
    }

    fn refs(&self) -> Result<BTreeMap<String, ObjectId>, GraphError> {
        (**self).refs()
    }
}
