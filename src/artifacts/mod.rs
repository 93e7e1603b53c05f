//! Git data structures and algorithms
//!
//! - `diff`: tree diffing, used to find the paths a commit changed
//! - `filter`: composable commit filters
//! - `graph`: the commit graph abstraction walks run against
//! - `objects`: Git object types (commit, tree)
//! - `walk`: filtered history traversal

pub mod diff;
pub mod filter;
pub mod graph;
pub mod objects;
pub mod walk;
