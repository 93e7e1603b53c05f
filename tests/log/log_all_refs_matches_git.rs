use crate::common::command::{
    CommitSpec, ALICE, bitwalk_stdout, branching_repository_dir, commit_file, git_stdout,
    run_git_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn log_all_includes_unmerged_branches(
    branching_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = branching_repository_dir.path();

    // A branch that was never merged back
    run_git_command(dir, &["checkout", "-q", "-b", "topic", "v1"])
        .assert()
        .success();
    commit_file(
        dir,
        "topic.txt",
        "topic",
        CommitSpec::new("Topic work", "2024-01-01 14:00:00 +0000", ALICE),
    );
    run_git_command(dir, &["checkout", "-q", "master"])
        .assert()
        .success();

    let expected = git_stdout(dir, &["log", "--all", "--format=%H %s"]);
    let actual = bitwalk_stdout(dir, &["log", "--all", "--format", "oneline"]);

    assert_eq!(actual, expected);
    assert!(actual.contains("Topic work"));

    let head_only = bitwalk_stdout(dir, &["log", "--format", "oneline"]);
    assert!(!head_only.contains("Topic work"));

    Ok(())
}
