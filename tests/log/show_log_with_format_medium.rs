use crate::common::command::{
    bitwalk_stdout, branching_repository_dir, get_head_commit_sha, git_stdout,
    linear_repository_dir,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_log_with_format_medium_matches_git(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    let expected = git_stdout(dir, &["log", "--no-decorate", "--format=medium"]);
    let actual = bitwalk_stdout(dir, &["log"]);

    assert_eq!(actual, expected);

    Ok(())
}

#[rstest]
fn show_single_commit_with_format_medium(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();
    let head = get_head_commit_sha(dir);

    let actual = bitwalk_stdout(dir, &["log", "-n", "1"]);

    assert_eq!(
        actual,
        format!(
            "commit {head}\n\
             Author: Bob <bob@example.com>\n\
             Date:   Mon Jan 1 13:00:00 2024 +0000\n\
             \n    Update lib\n"
        )
    );

    Ok(())
}

#[rstest]
fn show_merge_commit_with_parents(
    branching_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = branching_repository_dir.path();

    let actual = bitwalk_stdout(dir, &["log", "-n", "1"]);
    let parents = git_stdout(dir, &["log", "-n", "1", "--format=%p"]);

    let mut lines = actual.lines();
    assert_eq!(lines.next(), Some(format!("commit {}", get_head_commit_sha(dir)).as_str()));
    assert_eq!(lines.next(), Some(format!("Merge: {}", parents.trim()).as_str()));

    Ok(())
}
