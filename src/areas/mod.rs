//! On-disk repository access
//!
//! Read-only building blocks over an existing `.git` directory:
//!
//! - `database`: loose object reader (commits, trees, tags) and changed paths
//! - `refs`: HEAD, loose and packed refs
//! - `repository`: discovery, revision resolution and the commit graph

pub(crate) mod database;
pub(crate) mod refs;
pub mod repository;
