//! Filtered traversal of git commit history
//!
//! - `artifacts`: commit model, graph provider contract, filters and the walker
//! - `areas`: read-only access to an existing repository on disk
//! - `commands`: the `log`, `count` and `refs` commands of the binary

pub mod areas;
pub mod artifacts;
pub mod commands;

/// Layout used to print a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommitDisplayFormat {
    #[default]
    Medium,
    #[value(name = "oneline")]
    OneLine,
}
