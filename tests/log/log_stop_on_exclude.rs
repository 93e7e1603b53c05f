use crate::common::command::{
    ALICE, CommitSpec, bitwalk_stdout, commit_file, init_repository_dir, run_bitwalk_command,
    subjects,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn release_history(dir: &Path) {
    let commits = [
        ("1.txt", "feat: first", "2024-01-01 10:00:00 +0000"),
        ("2.txt", "wip", "2024-01-01 11:00:00 +0000"),
        ("3.txt", "feat: third", "2024-01-01 12:00:00 +0000"),
        ("4.txt", "feat: fourth", "2024-01-01 13:00:00 +0000"),
    ];

    for (path, message, date) in commits {
        commit_file(dir, path, message, CommitSpec::new(message, date, ALICE));
    }
}

#[rstest]
fn log_without_stop_skips_excluded_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    release_history(dir);

    let actual = bitwalk_stdout(dir, &["log", "--format", "oneline", "--grep", "^feat"]);

    assert_eq!(
        subjects(&actual),
        vec!["feat: fourth", "feat: third", "feat: first"]
    );

    Ok(())
}

#[rstest]
#[case::date_order(&[])]
#[case::topo_order(&["--topo-order"])]
fn log_stop_on_exclude_prunes_older_history(
    init_repository_dir: TempDir,
    #[case] order: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    release_history(dir);

    let mut args = vec!["log", "--format", "oneline", "--grep", "^feat", "--stop-on-exclude"];
    args.extend_from_slice(order);
    let actual = bitwalk_stdout(dir, &args);

    assert_eq!(subjects(&actual), vec!["feat: fourth", "feat: third"]);

    Ok(())
}

#[rstest]
fn count_stop_on_exclude(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    release_history(dir);

    run_bitwalk_command(dir, &["count", "--grep", "^feat", "--stop-on-exclude"])
        .assert()
        .success()
        .stdout("2\n");

    Ok(())
}
