//! End-to-end tests running the real `collbench` binary.
//!
//! Iteration times are cut to a few milliseconds so forked and in-process runs
//! finish quickly; the protocol is otherwise the standard one.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::process::{Command, Output};

const QUICK: [&str; 8] = [
    "--warmup-iterations",
    "1",
    "--warmup-time",
    "2ms",
    "--measurement-iterations",
    "2",
    "--measurement-time",
    "2ms",
];

/// Test helper: run the binary with the given arguments
fn collbench(args: &[&str]) -> Output {
    match Command::new(env!("CARGO_BIN_EXE_collbench"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
    {
        Ok(output) => output,
        Err(e) => panic!("failed to launch collbench: {e}"),
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn data_rows(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .filter(|line| line.starts_with("collection_initialization."))
        .collect()
}

#[test]
fn test_list_shows_every_operation() {
    let output = collbench(&["list"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names.len(), 14);
    assert!(names.contains(&"collection_initialization.create_array_list_from_set_iteratively"));
    assert!(names.contains(&"collection_initialization.create_hash_set_from_array_list"));
}

#[test]
fn test_in_process_run_prints_table() {
    let mut args = vec!["create_array_list_from_array_list$", "--forks", "0"];
    args.extend(QUICK);
    let output = collbench(&args);
    assert!(output.status.success(), "{output:?}");

    let stdout = stdout_of(&output);
    assert!(stdout.lines().next().unwrap().starts_with("Benchmark"));

    let rows = data_rows(&stdout);
    assert_eq!(rows.len(), 1);
    let columns: Vec<&str> = rows[0].split_whitespace().collect();
    assert_eq!(
        columns[0],
        "collection_initialization.create_array_list_from_array_list"
    );
    assert_eq!(columns[1], "avgt");
    assert_eq!(columns[2], "2");
    assert_eq!(columns.last(), Some(&"ns/op"));
}

#[test]
fn test_forked_run_aggregates_all_forks() {
    let mut args = vec!["run", "hash_set_from_(set|linked_list)$", "--forks", "2"];
    args.extend(QUICK);
    let output = collbench(&args);
    assert!(output.status.success(), "{output:?}");

    let stdout = stdout_of(&output);
    let rows = data_rows(&stdout);
    assert_eq!(rows.len(), 2);
    for row in rows {
        let columns: Vec<&str> = row.split_whitespace().collect();
        // 2 forks x 2 measurement iterations
        assert_eq!(columns[2], "4", "{row}");
        assert!(row.contains('±'), "{row}");
    }
}

#[test]
fn test_json_report() {
    let mut args = vec![
        "create_linked_list_from_set$",
        "--forks",
        "1",
        "--format",
        "json",
    ];
    args.extend(QUICK);
    let output = collbench(&args);
    assert!(output.status.success(), "{output:?}");

    let report: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(report["suite_name"], "collection_initialization");
    assert_eq!(report["results"][0]["operation"], "create_linked_list_from_set");
    assert_eq!(report["results"][0]["statistics"]["count"], 2);
    assert_eq!(report["results"][0]["scores"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_fork_streams_iteration_records() {
    let mut args = vec!["fork", "--operation", "create_hash_set_from_set"];
    args.extend(QUICK);
    let output = collbench(&args);
    assert!(output.status.success(), "{output:?}");

    let stdout = stdout_of(&output);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let phases: Vec<&str> = records
        .iter()
        .map(|r| r["phase"].as_str().unwrap())
        .collect();
    assert_eq!(phases, vec!["warmup", "measure", "measure"]);
    assert!(records.iter().all(|r| r["ops"].as_u64().unwrap() > 0));
}

#[test]
fn test_unmatched_pattern_fails() {
    let output = collbench(&["create_tree_from_set", "--forks", "0"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no operation matches"), "{stderr}");
}

#[test]
fn test_invalid_parameters_fail() {
    let output = collbench(&["--measurement-iterations", "0", "--forks", "0"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("measurement iterations must be greater than 0"), "{stderr}");
}
