//! Integration tests for the `lanes` binary.
//!
//! These tests exercise the full CLI against history files written to a
//! temporary directory.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const HISTORY: &str = r#"{
    "branches": ["main", "feature"],
    "commits": [
        {"commit_hash": "a", "message": "prep station", "branch": "main", "parent_commits": []},
        {"commit_hash": "b", "message": "add sesame seed bun to the order", "branch": "feature", "parent_commits": ["a"]},
        {"commit_hash": "c", "message": "add patty", "branch": "main", "parent_commits": ["a"]},
        {"commit_hash": "d", "message": "merge feature", "branch": "main", "parent_commits": ["c", "b"]}
    ]
}"#;

// =============================================================================
// Fixtures
// =============================================================================

/// A temp directory holding `history.json`.
///
/// `COMMIT_LANES_CONFIG` points at a file that never exists and `HOME` /
/// `XDG_CONFIG_HOME` point inside the temp dir, so the user's own config
/// never leaks into a test.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(history: &str) -> Self {
        let dir = TempDir::new().unwrap();
        dir.child("history.json").write_str(history).unwrap();
        Self { dir }
    }

    fn lanes(&self) -> Command {
        let mut cmd = Command::cargo_bin("lanes").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("COMMIT_LANES_CONFIG");
        cmd
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.lanes().args(args).output().unwrap();
        assert!(output.status.success(), "{:?}", output);
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

// =============================================================================
// Basics
// =============================================================================

#[test]
fn version_flag_works() {
    Command::cargo_bin("lanes")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lanes"));
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("lanes")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("layout"))
        .stdout(predicate::str::contains("navigate"));
}

// =============================================================================
// layout
// =============================================================================

#[test]
fn layout_text() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["layout", "history.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lane 1: feature at (200, 40)"))
        .stdout(predicate::str::contains("(50, 400)"))
        .stdout(predicate::str::contains("add sesame seed bun ..."))
        .stdout(predicate::str::contains("canvas: 400 x 500"));
}

#[test]
fn layout_json() {
    let ws = Workspace::new(HISTORY);
    let json = ws.json(&["layout", "history.json", "--json"]);

    let commits = json["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 4);
    assert_eq!(commits[3]["hash"], "d");
    assert_eq!(commits[3]["x"], 50);
    assert_eq!(commits[3]["y"], 400);
    assert_eq!(commits[1]["lane"], 1);
    assert_eq!(json["headers"][0]["branch"], "main");
    assert_eq!(json["canvas"]["width"], 400);
}

#[test]
fn layout_hide_branch() {
    let ws = Workspace::new(HISTORY);
    let json = ws.json(&["layout", "history.json", "--hide", "feature", "--json"]);

    let hashes: Vec<&str> = json["commits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["hash"].as_str().unwrap())
        .collect();
    assert_eq!(hashes, vec!["a", "c", "d"]);
    assert_eq!(json["commits"][2]["has_external_parent"], true);
}

#[test]
fn layout_branch_order() {
    let ws = Workspace::new(HISTORY);
    let json = ws.json(&["layout", "history.json", "-b", "feature", "-b", "main", "--json"]);
    assert_eq!(json["commits"][0]["hash"], "a");
    assert_eq!(json["commits"][0]["x"], 200);
    assert_eq!(json["commits"][1]["x"], 50);
}

#[test]
fn layout_warns_on_empty_branch() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["layout", "history.json", "--show", "nothing-here"])
        .assert()
        .success()
        .stderr(predicate::str::contains("branch 'nothing-here' has no commits"));
}

#[test]
fn layout_refuses_cycles() {
    let ws = Workspace::new(
        r#"[
            {"commit_hash": "x", "branch": "main", "parent_commits": ["y"]},
            {"commit_hash": "y", "branch": "main", "parent_commits": ["x"]}
        ]"#,
    );
    ws.lanes()
        .args(["layout", "history.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to lay out"));
}

#[test]
fn layout_missing_file() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["layout", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"))
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn quiet_suppresses_output() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["-q", "layout", "history.json"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn debug_logs_to_stderr() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["--debug", "layout", "history.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[debug] loaded 4 commits"));
}

// =============================================================================
// edges
// =============================================================================

#[test]
fn edges_json() {
    let ws = Workspace::new(HISTORY);
    let json = ws.json(&["edges", "history.json", "--hide", "feature", "--json"]);

    assert_eq!(json["in_lane"].as_array().unwrap().len(), 2);
    let external = &json["external"][0];
    assert_eq!(external["parent"], "b");
    assert_eq!(external["child"], "d");
    assert_eq!(external["ordinal"], 0);
    assert_eq!(external["kind"], "hidden_branch");
}

#[test]
fn edges_text() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["edges", "history.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a -> c  (50, 100) -> (50, 250)"));
}

// =============================================================================
// navigate
// =============================================================================

#[test]
fn navigate_finds_neighbor() {
    let ws = Workspace::new(HISTORY);
    let json = ws.json(&["navigate", "history.json", "--from", "c", "right", "--json"]);
    assert_eq!(json["to"]["hash"], "b");
    assert_eq!(json["direction"], "right");
}

#[test]
fn navigate_nowhere_is_success() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["navigate", "history.json", "--from", "a", "up"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no commit up of 'a'"));

    let json = ws.json(&["navigate", "history.json", "--from", "a", "up", "--json"]);
    assert!(json["to"].is_null());
}

#[test]
fn navigate_from_hidden_commit() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["navigate", "history.json", "--hide", "feature", "--from", "b", "down"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not on a visible branch"));
}

#[test]
fn navigate_rejects_bad_direction() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["navigate", "history.json", "--from", "a", "sideways"])
        .assert()
        .failure();
}

// =============================================================================
// info
// =============================================================================

#[test]
fn info_visible_commit() {
    let ws = Workspace::new(HISTORY);
    let json = ws.json(&["info", "history.json", "d", "--json"]);
    assert_eq!(json["depth"], 2);
    assert_eq!(json["placement"]["anchor"]["y"], 400);
    assert_eq!(json["placement"]["popup"]["max_width"], 130);
    assert_eq!(json["parents"][1], "b");
}

#[test]
fn info_hidden_commit() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["info", "history.json", "b", "-b", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Depth: 1"))
        .stdout(predicate::str::contains("Visible: no"));
}

#[test]
fn info_unknown_commit() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["info", "history.json", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("commit 'zzz' not found"));
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_clean() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .args(["check", "history.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 4 commits on 2 branches"));
}

#[test]
fn check_reports_warnings() {
    let ws = Workspace::new(
        r#"{"branches": ["main"], "commits": [
            {"commit_hash": "a", "branch": "main", "parent_commits": ["lost"]},
            {"commit_hash": "s", "branch": "side", "parent_commits": ["a"]}
        ]}"#,
    );
    ws.lanes()
        .args(["check", "history.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("commit 'a' has unknown parent 'lost'"))
        .stderr(predicate::str::contains("branch 'side' is used but not declared"))
        .stdout(predicate::str::contains("2 warning(s)"));
}

#[test]
fn check_fails_on_cycle() {
    let ws = Workspace::new(
        r#"[{"commit_hash": "loop", "branch": "main", "parent_commits": ["loop"]}]"#,
    );
    ws.lanes()
        .args(["check", "history.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parent cycle"));
}

#[test]
fn deep_linear_history() {
    let mut commits = vec![r#"{"commit_hash": "c0", "branch": "main", "parent_commits": []}"#.to_string()];
    for i in 1..120_000 {
        commits.push(format!(
            r#"{{"commit_hash": "c{i}", "branch": "main", "parent_commits": ["c{}"]}}"#,
            i - 1
        ));
    }
    let ws = Workspace::new(&format!("[{}]", commits.join(",")));

    ws.lanes()
        .args(["check", "history.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 120000 commits on 1 branches"));
    ws.lanes()
        .args(["info", "history.json", "c119999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Depth: 119999"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_defaults() {
    let ws = Workspace::new(HISTORY);
    ws.lanes()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("lane_spacing = 150"))
        .stdout(predicate::str::contains("max_message_len = 20"));
}

#[test]
fn project_config_changes_layout() {
    let ws = Workspace::new(HISTORY);
    ws.dir
        .child(".commit-lanes.toml")
        .write_str(
            r#"
            [layout]
            lane_spacing = 100
            depth_spacing = 50

            [display]
            visible = ["feature"]
            max_message_len = 3
            "#,
        )
        .unwrap();

    let json = ws.json(&["layout", "history.json", "--json"]);
    let commits = json["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0]["y"], 150);
    assert_eq!(commits[0]["label"], "add...");
}

#[test]
fn global_config_from_env() {
    let ws = Workspace::new(HISTORY);
    ws.dir
        .child("global.toml")
        .write_str("[layout]\nbase_x = 0\n")
        .unwrap();

    let json = ws
        .lanes()
        .env("COMMIT_LANES_CONFIG", ws.dir.path().join("global.toml"))
        .args(["layout", "history.json", "--json"])
        .output()
        .unwrap();
    assert!(json.status.success());
    let json: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert_eq!(json["commits"][0]["x"], 0);
}

#[test]
fn invalid_config_is_an_error() {
    let ws = Workspace::new(HISTORY);
    ws.dir
        .child(".commit-lanes.toml")
        .write_str("[layout]\npopup_margin = 500\n")
        .unwrap();
    ws.lanes()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("popup_margin"));
}

#[test]
fn oversized_spacing_is_rejected() {
    let ws = Workspace::new(HISTORY);
    ws.dir
        .child(".commit-lanes.toml")
        .write_str("[layout]\nlane_spacing = 9223372036854775807\n")
        .unwrap();
    ws.lanes()
        .args(["layout", "history.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("layout.lane_spacing must be between"));
}

// =============================================================================
// completion
// =============================================================================

#[test]
fn completion_bash() {
    Command::cargo_bin("lanes")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lanes"));
}
