//! Git object types read by the walker
//!
//! Git stores all content as objects identified by SHA-1 hashes. The walker
//! reads three of them:
//!
//! - **Commit**: history node (parents, author, committer, message)
//! - **Tree**: directory listing, used to compute changed paths
//! - **Tag**: annotated reference, peeled to the commit it points at
//!
//! Objects are stored as `<type> <size>\0<content>`.

pub mod commit;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
