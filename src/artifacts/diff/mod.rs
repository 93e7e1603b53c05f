//! Tree comparison
//!
//! `tree_diff` walks two trees side by side and collects the paths whose
//! entries were added, removed or changed. Walks use it to attach changed
//! paths to commits for path filtering.

pub mod tree_diff;
