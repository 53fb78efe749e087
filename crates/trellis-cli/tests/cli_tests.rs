use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SHIP_DOCS: &str = r#"[
    {"op": "create_plan", "goal": "ship docs", "tasks": [
        {"title": "write", "priority": 5},
        {"title": "review", "priority": 3, "depends_on": [1]}
    ]},
    {"op": "next_actions", "max_actions": 5},
    {"op": "update_task_status", "task_id": 1, "status": "done", "result_summary": "Drafted"},
    {"op": "next_actions", "max_actions": 5},
    {"op": "summarize_progress"}
]"#;

/// Helper function to write a script into a temporary directory
fn write_script(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("script.json");
    fs::write(&path, contents).expect("Failed to write script");
    (temp_dir, path)
}

/// Helper function to create a Command with --no-color flag for testing
fn trellis_cmd() -> Command {
    let mut cmd = Command::cargo_bin("trellis").expect("Failed to find trellis binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_run_markdown() {
    let (_temp_dir, script) = write_script(SHIP_DOCS);

    trellis_cmd()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. create_plan [default]"))
        .stdout(predicate::str::contains("Created plan with ID: "))
        .stdout(predicate::str::contains("# ship docs"))
        .stdout(predicate::str::contains("### 2. review (○ Pending)"))
        .stdout(predicate::str::contains("Updated task with ID: 1"))
        .stdout(predicate::str::contains("- Completed: 1/2 (50.0%)"));
}

#[test]
fn test_cli_run_json_is_single_array() {
    let (_temp_dir, script) = write_script(SHIP_DOCS);

    let output = trellis_cmd()
        .args(["run", script.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("Failed to run trellis");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    let envelopes = value.as_array().expect("Expected a JSON array");
    assert_eq!(envelopes.len(), 5);
    assert_eq!(envelopes[0]["operation"], "create_plan");
    assert_eq!(envelopes[1]["result"]["actions"][0]["task_id"], 1);
    assert_eq!(envelopes[3]["result"]["actions"][0]["task_id"], 2);
    assert_eq!(envelopes[4]["result"]["completion_ratio"], 0.5);
}

#[test]
fn test_cli_run_reports_failures_and_succeeds() {
    let (_temp_dir, script) = write_script(
        r#"[
            {"op": "add_task", "title": "orphan"},
            {"op": "create_plan", "goal": "g", "tasks": [{"title": "a"}]},
            {"op": "add_task", "title": "X", "depends_on": [999]}
        ]"#,
    );

    trellis_cmd()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Error: add_task failed: No active plan (call create_plan first)",
        ))
        .stdout(predicate::str::contains("999"));
}

#[test]
fn test_cli_run_reads_stdin() {
    trellis_cmd()
        .args(["run", "-", "--format", "json"])
        .write_stdin(r#"[{"op": "reset_plan", "session": "s1"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""active": false"#))
        .stdout(predicate::str::contains(r#""session": "s1""#));
}

#[test]
fn test_cli_run_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let missing = temp_dir.path().join("missing.json");

    trellis_cmd()
        .args(["run", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn test_cli_run_missing_field_is_reported_in_envelope() {
    let (_temp_dir, script) = write_script(
        r#"[
            {"op": "create_plan", "goal": "g", "tasks": [{"title": "a"}]},
            {"op": "add_task", "priority": 1},
            {"op": "summarize_progress"}
        ]"#,
    );

    let output = trellis_cmd()
        .args(["run", script.to_str().unwrap(), "--format", "json"])
        .output()
        .expect("Failed to run trellis");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    let envelopes = value.as_array().expect("Expected an array");
    assert_eq!(envelopes.len(), 3);
    assert_eq!(envelopes[1]["metadata"]["error_kind"], "validation");
    assert_eq!(envelopes[2]["result"]["total"], 1);
}

#[test]
fn test_cli_run_invalid_script() {
    let (_temp_dir, script) = write_script(r#"[{"op": "launch_rockets"}]"#);

    trellis_cmd()
        .args(["run", script.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

#[test]
fn test_cli_max_actions_ceiling_flag() {
    let (_temp_dir, script) = write_script(
        r#"[
            {"op": "create_plan", "goal": "g", "tasks": [{"title": "a"}, {"title": "b"}, {"title": "c"}]},
            {"op": "next_actions", "max_actions": 10}
        ]"#,
    );

    let output = trellis_cmd()
        .args([
            "--max-actions-ceiling",
            "2",
            "run",
            script.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("Failed to run trellis");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[1]["result"]["actions"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_rejects_invalid_limits() {
    let (_temp_dir, script) = write_script("[]");

    trellis_cmd()
        .args(["--max-tasks-ceiling", "0", "run", script.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize plan store"));
}

#[test]
fn test_cli_help() {
    trellis_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("run"));
}
