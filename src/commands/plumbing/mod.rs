//! Plumbing commands (low-level listings)
//!
//! ## Commands
//!
//! - `refs`: List every ref with the commit it points to

pub mod refs;
