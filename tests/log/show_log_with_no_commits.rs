use crate::common::command::{init_repository_dir, run_bitwalk_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_log_with_no_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[rstest]
fn count_with_no_commits(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(init_repository_dir.path(), &["count"])
        .assert()
        .success()
        .stdout("0\n");

    Ok(())
}

#[rstest]
fn refs_with_no_commits(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(init_repository_dir.path(), &["refs"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}
