use crate::common::command::{
    git_stdout, linear_repository_dir, run_bitwalk_command, subjects,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn log_missing_parent_prints_partial_history(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    // Drop the second commit's object, leaving the tip and its parent intact
    let second = git_stdout(dir, &["rev-parse", "HEAD~2"]).trim().to_string();
    let (prefix, rest) = second.split_at(2);
    std::fs::remove_file(dir.join(".git").join("objects").join(prefix).join(rest))?;

    let output = run_bitwalk_command(dir, &["log", "--format", "oneline"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(&second))
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        subjects(&String::from_utf8(output)?),
        vec!["Update lib", "Update a"]
    );

    Ok(())
}

#[rstest]
fn log_missing_parent_behind_stop_is_never_read(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    let root = git_stdout(dir, &["rev-parse", "HEAD~3"]).trim().to_string();
    let (prefix, rest) = root.split_at(2);
    std::fs::remove_file(dir.join(".git").join("objects").join(prefix).join(rest))?;

    run_bitwalk_command(
        dir,
        &["log", "--format", "oneline", "--grep", "^Update", "--stop-on-exclude"],
    )
    .assert()
    .success();

    Ok(())
}
