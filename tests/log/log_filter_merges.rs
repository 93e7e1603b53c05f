use crate::common::command::{bitwalk_stdout, branching_repository_dir, git_stdout, subjects};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::merges("--merges", vec!["Merge feature"])]
#[case::no_merges("--no-merges", vec!["Master work", "Feature work", "Base"])]
fn log_filter_by_parent_count(
    branching_repository_dir: TempDir,
    #[case] flag: &str,
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = branching_repository_dir.path();

    let actual = bitwalk_stdout(dir, &["log", "--format", "oneline", flag]);

    assert_eq!(subjects(&actual), expected);
    assert_eq!(actual, git_stdout(dir, &["log", "--format=%H %s", flag]));

    Ok(())
}
