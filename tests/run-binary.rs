use assert_cmd::prelude::*;
use std::process::Command;

fn sokoban_search() -> Command {
    Command::cargo_bin("sokoban-search").unwrap()
}

#[test]
fn run_bfs() {
    let output = r"Solving levels/custom/02-one-way.txt using bfs...
Found solution:
UU
Moves: 2
Pushes: 2
Expanded: 3
Explored: 4
Created: 4
Reached duplicates: 0
Reopened: 0
";

    sokoban_search()
        .arg("levels/custom/02-one-way.txt")
        .assert()
        .success()
        .stdout(output);
}

#[test]
fn run_astar_verbose_replay() {
    let output = r"Solving levels/custom/02-one-way.txt using a-star...
Expanded new depth: 0 (expanded 1, explored 1)
Expanded new depth: 1 (expanded 2, explored 2)
Expanded new depth: 2 (expanded 3, explored 4)
Found solution:
###
#.#
# #
#$#
#@#
###

###
#.#
#$#
#@#
# #
###

###
#*#
#@#
# #
# #
###

UU
Moves: 2
Pushes: 2
Expanded: 3
Explored: 4
Created: 4
Reached duplicates: 0
Reopened: 0
";

    sokoban_search()
        .arg("--astar")
        .arg("--verbose")
        .arg("--replay")
        .arg("levels/custom/02-one-way.txt")
        .assert()
        .success()
        .stdout(output);
}

#[test]
fn run_no_solution() {
    let output = sokoban_search()
        .arg("levels/custom/no-solution-corner.txt")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\nNo solution\n"));
    assert!(stdout.contains("Expanded: 8\nExplored: 8\n"));
}

#[test]
fn run_stats_table() {
    let output = sokoban_search()
        .arg("--stats")
        .arg("levels/custom/04-two-boxes.txt")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Moves: 4\nPushes: 2\n"));
    assert!(stdout.contains("Depth"));
    assert!(stdout.contains("Duplicates"));
}

#[test]
fn run_bad_method_args() {
    // doesn't check stderr, clap's wording is not ours to test
    sokoban_search()
        .arg("--bfs")
        .arg("--astar")
        .arg("levels/custom/02-one-way.txt")
        .assert()
        .failure()
        .stdout("");
}

#[test]
fn run_missing_file() {
    sokoban_search()
        .arg("levels/custom/does-not-exist.txt")
        .assert()
        .failure()
        .code(1)
        .stdout("");
}
