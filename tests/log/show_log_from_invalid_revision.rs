use crate::common::command::{linear_repository_dir, repository_dir, run_bitwalk_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::unknown_branch("no-such-branch")]
#[case::unknown_object("0123456789012345678901234567890123456789")]
#[case::short_prefix("abc")]
fn show_log_from_invalid_revision(
    linear_repository_dir: TempDir,
    #[case] revision: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(linear_repository_dir.path(), &["log", revision])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[rstest]
fn show_log_reports_unknown_revision(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(linear_repository_dir.path(), &["log", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown revision"));

    Ok(())
}

#[rstest]
fn show_log_outside_git_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let not_git = repository_dir.path().to_string_lossy().to_string();

    run_bitwalk_command(repository_dir.path(), &["--git-dir", &not_git, "log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a git directory"));

    Ok(())
}
