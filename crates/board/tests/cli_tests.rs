//! End-to-end tests for the `board` binary
//!
//! Every test runs in its own temp directory so the onboarding state file
//! and any `board.toml` never leak between tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a board command isolated from the user's config and environment
fn board_in(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("board");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("BOARD_CONFIG")
        .env_remove("BOARD_SEED")
        .env_remove("BOARD_USER")
        .env_remove("BOARD_STATE_FILE")
        .env_remove("BOARD_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

const SMALL_SEED: &str = r#"
[project]
id = "1"
key = "OPS"
name = "Operations"
lead = "u-1"

[[users]]
id = "u-1"
name = "Dana Lee"
email = "dana@example.com"

[[columns]]
id = "backlog"
status = "to-do"

[[columns]]
id = "doing"
status = "in-progress"
limit = 1

[[columns]]
id = "shipped"
status = "done"

[[issues]]
key = "OPS-1"
summary = "Rotate certificates"
type = "task"
priority = "high"
status = "in-progress"
reporter = "u-1"
created_at = "2024-03-01T09:00:00Z"
"#;

// =============================================================================
// basics
// =============================================================================

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kanban board for tracking issues"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("board"));
}

#[test]
fn test_completions_generate_script() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_board"));
}

// =============================================================================
// show / search
// =============================================================================

#[test]
fn test_show_lists_demo_columns_in_order() {
    let dir = TempDir::new().unwrap();
    let columns = json_stdout(board_in(dir.path()).args(["show", "-o", "json"]));

    let columns = columns.as_array().unwrap();
    let statuses: Vec<&str> = columns.iter().map(|c| c["status"].as_str().unwrap()).collect();
    assert_eq!(statuses, ["to-do", "in-progress", "done"]);

    let total: usize = columns.iter().map(|c| c["issues"].as_array().unwrap().len()).sum();
    assert_eq!(total, 8);
    assert_eq!(columns[1]["limit"], 3);
}

#[test]
fn test_show_text_marks_columns() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("TO DO [to-do] 4"))
        .stdout(predicate::str::contains("IN PROGRESS [in-progress] 2/3"));
}

#[test]
fn test_show_filters_keep_every_column() {
    let dir = TempDir::new().unwrap();
    let columns = json_stdout(board_in(dir.path()).args([
        "show", "-o", "json", "--label", "ui", "--status", "to-do",
    ]));

    let columns = columns.as_array().unwrap();
    assert_eq!(columns.len(), 3);
    let keys: Vec<&str> = columns[0]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, ["PROJ-3"]);
    assert!(columns[1]["issues"].as_array().unwrap().is_empty());
    assert!(columns[2]["issues"].as_array().unwrap().is_empty());
}

#[test]
fn test_search_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let hits = json_stdout(board_in(dir.path()).args(["issue", "search", "AUTH", "-o", "json"]));

    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["key"], "PROJ-1");
}

#[test]
fn test_search_without_hits_in_text() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["issue", "search", "no-such-thing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found."));
}

// =============================================================================
// create / move / update
// =============================================================================

#[test]
fn test_create_assigns_next_key() {
    let dir = TempDir::new().unwrap();
    let issue = json_stdout(board_in(dir.path()).args([
        "issue", "create", "-s", "Write release notes", "-t", "story", "-l", "docs", "-o", "json",
    ]));

    assert_eq!(issue["key"], "PROJ-9");
    assert_eq!(issue["status"], "to-do");
    assert_eq!(issue["type"], "story");
    assert_eq!(issue["priority"], "medium");
    assert_eq!(issue["reporter"]["id"], "u-alex");
    assert_eq!(issue["labels"], serde_json::json!(["docs"]));
}

#[test]
fn test_create_blank_summary_is_a_validation_error() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["issue", "create", "-s", "   ", "-o", "json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(r#""code": "validation""#));
}

#[test]
fn test_move_reports_new_status() {
    let dir = TempDir::new().unwrap();
    let issue = json_stdout(board_in(dir.path()).args([
        "issue", "move", "PROJ-3", "--to", "done", "-o", "json",
    ]));

    assert_eq!(issue["status"], "done");
    assert_ne!(issue["updated_at"], issue["created_at"]);
}

#[test]
fn test_move_from_wrong_column_is_not_found() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["issue", "move", "PROJ-3", "--from", "done", "--to", "in-progress", "-o", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#""code": "not_found""#));
}

#[test]
fn test_update_with_json_payload() {
    let dir = TempDir::new().unwrap();
    let issue = json_stdout(board_in(dir.path()).args([
        "issue",
        "update",
        "PROJ-1",
        "--json",
        r#"{"priority": "lowest", "assignee": "clear"}"#,
        "-o",
        "json",
    ]));

    assert_eq!(issue["priority"], "lowest");
    assert!(issue["assignee"].is_null());
}

#[test]
fn test_unknown_issue_in_text_mode() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["issue", "get", "PROJ-99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to find issue 'PROJ-99'"));
}

// =============================================================================
// session
// =============================================================================

#[test]
fn test_session_keeps_changes_between_lines() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["session", "-o", "json"])
        .write_stdin("issue move PROJ-5 --to in-progress\nissue get PROJ-5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""status": "in-progress""#))
        .stdout(predicate::str::contains(r#""status": "to-do""#).not());

    // Each run starts again from the seed
    let issue = json_stdout(board_in(dir.path()).args(["issue", "get", "PROJ-5", "-o", "json"]));
    assert_eq!(issue["status"], "to-do");
}

#[test]
fn test_session_reports_failed_lines() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["session", "-o", "json"])
        .write_stdin("issue get PROJ-404\nproject\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Jira Clone"))
        .stderr(predicate::str::contains("line 1"))
        .stderr(predicate::str::contains("1 of 2 session commands failed"));
}

// =============================================================================
// onboarding
// =============================================================================

#[test]
fn test_welcome_is_shown_once() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("Welcome to board!"));

    assert!(dir.path().join(".board-state.json").exists());

    board_in(dir.path())
        .arg("show")
        .assert()
        .success()
        .stderr(predicate::str::contains("Welcome").not());
}

#[test]
fn test_onboarding_complete_and_reset() {
    let dir = TempDir::new().unwrap();

    let status = json_stdout(board_in(dir.path()).args(["onboarding", "status", "-o", "json"]));
    assert_eq!(status["onboarding_seen"], false);

    board_in(dir.path()).args(["onboarding", "complete"]).assert().success();
    let status = json_stdout(board_in(dir.path()).args(["onboarding", "status", "-o", "json"]));
    assert_eq!(status["onboarding_seen"], true);

    board_in(dir.path())
        .args(["onboarding", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Onboarding reset"));
    assert!(!dir.path().join(".board-state.json").exists());
}

// =============================================================================
// config / seed / user
// =============================================================================

#[test]
fn test_config_path_lists_local_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("board.toml"), "user = \"u-emma\"\n").unwrap();

    board_in(dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("board.toml [found]"));
}

#[test]
fn test_local_config_sets_acting_user() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("board.toml"), "user = \"Emma Wilson\"\n").unwrap();

    let issue = json_stdout(board_in(dir.path()).args(["issue", "create", "-s", "Audit", "-o", "json"]));
    assert_eq!(issue["reporter"]["id"], "u-emma");
}

#[test]
fn test_cli_user_overrides_env() {
    let dir = TempDir::new().unwrap();
    let issue = json_stdout(
        board_in(dir.path())
            .env("BOARD_USER", "u-sarah")
            .args(["issue", "comment", "PROJ-2", "Looks good", "-u", "u-mike", "-o", "json"]),
    );
    assert_eq!(issue["author"]["id"], "u-mike");
}

#[test]
fn test_unknown_acting_user_fails() {
    let dir = TempDir::new().unwrap();
    board_in(dir.path())
        .args(["show", "-u", "nobody", "-o", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#""code": "not_found""#));
}

#[test]
fn test_custom_seed_file() {
    let dir = TempDir::new().unwrap();
    let seed = dir.path().join("ops.toml");
    fs::write(&seed, SMALL_SEED).unwrap();

    let project = json_stdout(board_in(dir.path()).args([
        "project",
        "--seed",
        seed.to_str().unwrap(),
        "-o",
        "json",
    ]));
    assert_eq!(project["project"]["key"], "OPS");
    assert_eq!(project["users"].as_array().unwrap().len(), 1);

    let issue = json_stdout(board_in(dir.path()).env("BOARD_SEED", &seed).args([
        "issue", "create", "-s", "Patch kernel", "-o", "json",
    ]));
    assert_eq!(issue["key"], "OPS-2");
}

#[test]
fn test_invalid_seed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let seed = dir.path().join("broken.toml");
    fs::write(&seed, "[project]\nid = \"1\"\n").unwrap();

    board_in(dir.path())
        .args(["show", "--seed", seed.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load seed"));
}
