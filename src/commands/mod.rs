//! Command implementations
//!
//! - `plumbing`: raw listings (refs)
//! - `porcelain`: user-facing history queries (log, count)

pub mod plumbing;
pub mod porcelain;
