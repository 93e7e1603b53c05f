use crate::common::command::{
    bitwalk_stdout, linear_repository_dir, run_bitwalk_command, subjects,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::prefix("^Add", vec!["Add lib", "Add a"])]
#[case::anywhere("lib", vec!["Update lib", "Add lib"])]
#[case::no_match("^Remove", vec![])]
fn log_filter_by_message(
    linear_repository_dir: TempDir,
    #[case] pattern: &str,
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let actual = bitwalk_stdout(
        linear_repository_dir.path(),
        &["log", "--format", "oneline", "--grep", pattern],
    );

    assert_eq!(subjects(&actual), expected);

    Ok(())
}

#[rstest]
fn log_filter_by_inverted_message(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let actual = bitwalk_stdout(
        linear_repository_dir.path(),
        &["log", "--format", "oneline", "--grep", "^Add", "--invert-grep"],
    );

    assert_eq!(subjects(&actual), vec!["Update lib", "Update a"]);

    Ok(())
}

#[rstest]
fn log_rejects_invalid_message_pattern(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(linear_repository_dir.path(), &["log", "--grep", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid message pattern"));

    Ok(())
}

#[rstest]
fn log_rejects_invert_grep_without_grep(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_bitwalk_command(linear_repository_dir.path(), &["log", "--invert-grep"])
        .assert()
        .failure();

    Ok(())
}
