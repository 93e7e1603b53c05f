use crate::common::command::{
    CommitSpec, ALICE, BOB, bitwalk_stdout, commit_file, git_as, git_stdout,
    init_repository_dir, run_git_command, subjects,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::collections::HashMap;

#[rstest]
fn topo_order_never_shows_parent_before_child(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    // The side branch commit claims to be newer than the merge that takes it
    commit_file(
        dir,
        "base.txt",
        "base",
        CommitSpec::new("Base", "2024-01-01 10:00:00 +0000", ALICE),
    );
    run_git_command(dir, &["checkout", "-q", "-b", "skewed"])
        .assert()
        .success();
    commit_file(
        dir,
        "skewed.txt",
        "skewed",
        CommitSpec::new("Skewed clock", "2024-01-01 20:00:00 +0000", BOB),
    );
    run_git_command(dir, &["checkout", "-q", "master"])
        .assert()
        .success();
    commit_file(
        dir,
        "master.txt",
        "master",
        CommitSpec::new("Master work", "2024-01-01 11:00:00 +0000", ALICE),
    );
    git_as(
        dir,
        &CommitSpec::new("Merge skewed", "2024-01-01 12:00:00 +0000", ALICE),
        &["merge", "-q", "--no-ff", "-m", "Merge skewed", "skewed"],
    )
    .assert()
    .success();

    let output = bitwalk_stdout(dir, &["log", "--topo-order", "--format", "oneline"]);
    let position = output
        .lines()
        .enumerate()
        .filter_map(|(index, line)| line.split_once(' ').map(|(oid, _)| (oid.to_string(), index)))
        .collect::<HashMap<_, _>>();

    assert_eq!(position.len(), 4);
    for line in git_stdout(dir, &["log", "--format=%H %P"]).lines() {
        let mut ids = line.split_whitespace();
        let child = ids.next().unwrap();
        for parent in ids {
            assert!(
                position[child] < position[parent],
                "{child} must come before its parent {parent}"
            );
        }
    }

    assert_eq!(subjects(&output)[0], "Merge skewed");
    assert_eq!(subjects(&output)[3], "Base");

    Ok(())
}

#[rstest]
fn date_order_follows_timestamps_despite_skew(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    commit_file(
        dir,
        "old.txt",
        "old",
        CommitSpec::new("Dated late", "2024-01-02 10:00:00 +0000", ALICE),
    );
    commit_file(
        dir,
        "new.txt",
        "new",
        CommitSpec::new("Dated early", "2024-01-01 10:00:00 +0000", ALICE),
    );

    // A linear chain has a single possible order either way
    let by_date = bitwalk_stdout(dir, &["log", "--format", "oneline"]);
    let by_topo = bitwalk_stdout(dir, &["log", "--topo-order", "--format", "oneline"]);

    assert_eq!(subjects(&by_date), vec!["Dated early", "Dated late"]);
    assert_eq!(by_date, by_topo);

    Ok(())
}
