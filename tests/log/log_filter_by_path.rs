use crate::common::command::{
    bitwalk_stdout, git_stdout, linear_repository_dir, run_bitwalk_command, subjects,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::single_file(&["a.txt"], vec!["Update a", "Add a"])]
#[case::directory(&["src"], vec!["Update lib", "Add lib"])]
#[case::nested_file(&["src/lib.rs"], vec!["Update lib", "Add lib"])]
#[case::multiple_paths(&["a.txt", "src"], vec!["Update lib", "Update a", "Add lib", "Add a"])]
#[case::untouched(&["missing.txt"], vec![])]
fn log_filter_by_path(
    linear_repository_dir: TempDir,
    #[case] paths: &[&str],
    #[case] expected: Vec<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    let mut args = vec!["log", "--format", "oneline", "--"];
    args.extend_from_slice(paths);
    let actual = bitwalk_stdout(dir, &args);

    let mut git_args = vec!["log", "--format=%H %s", "--"];
    git_args.extend_from_slice(paths);

    assert_eq!(subjects(&actual), expected);
    assert_eq!(actual, git_stdout(dir, &git_args));

    Ok(())
}

#[rstest]
fn log_filter_by_path_counts_matches(
    linear_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = linear_repository_dir.path();

    run_bitwalk_command(dir, &["count", "--", "src"])
        .assert()
        .success()
        .stdout("2\n");

    Ok(())
}
