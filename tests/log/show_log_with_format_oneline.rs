use crate::common::command::{bitwalk_stdout, git_stdout, linear_repository_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::oneline_flag(&["--oneline"])]
#[case::format_and_abbrev(&["--format", "oneline", "--abbrev-commit"])]
fn show_log_with_abbreviated_oneline(
    linear_repository_dir: TempDir,
    #[case] flags: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    let mut args = vec!["log"];
    args.extend_from_slice(flags);
    let actual = bitwalk_stdout(dir, &args);

    assert_eq!(actual, git_stdout(dir, &["log", "--format=%h %s"]));

    Ok(())
}

#[rstest]
fn show_log_with_full_oneline(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    let actual = bitwalk_stdout(dir, &["log", "--format", "oneline"]);

    assert_eq!(actual, git_stdout(dir, &["log", "--format=%H %s"]));

    Ok(())
}
