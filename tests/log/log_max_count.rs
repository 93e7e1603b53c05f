use crate::common::command::{
    bitwalk_stdout, branching_repository_dir, git_stdout, linear_repository_dir, subjects,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(10)]
fn log_max_count_matches_git(
    branching_repository_dir: TempDir,
    #[case] count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = branching_repository_dir.path();
    let count = count.to_string();

    let actual = bitwalk_stdout(dir, &["log", "--format", "oneline", "-n", &count]);

    assert_eq!(
        actual,
        git_stdout(dir, &["log", "--format=%H %s", "-n", &count])
    );

    Ok(())
}

#[rstest]
fn log_max_count_applies_after_other_filters(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let actual = bitwalk_stdout(
        linear_repository_dir.path(),
        &["log", "--format", "oneline", "--author", "Alice", "--max-count", "1"],
    );

    assert_eq!(subjects(&actual), vec!["Update a"]);

    Ok(())
}
