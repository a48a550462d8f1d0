//! Basic CLI E2E tests.
//!
//! Tests run the built `tzgrid` binary against a temporary roster and an
//! isolated config directory, then verify outputs.

use std::path::{Path, PathBuf};
use std::process::Command;

const ROSTER: &str = r#"[
    {"name": "ana", "timezone": "Europe/Berlin", "team": "core",
     "blocked": [{"start": "12:00", "end": "13:00"}]},
    {"name": "bo", "timezone": "America/New_York", "team": "core", "preference": "early_bird"},
    {"name": "cy", "timezone": "Asia/Tokyo", "team": "infra"},
    {"name": "di", "team": "infra"}
]"#;

struct Env {
    dir: tempfile::TempDir,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("team.json"), ROSTER).unwrap();
        Self { dir }
    }

    fn roster(&self) -> PathBuf {
        self.dir.path().join("team.json")
    }

    fn config_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_tzgrid"))
            .args(args)
            .env("TZGRID_CONFIG_DIR", self.config_dir())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }
}

#[test]
fn test_score_table() {
    let env = Env::new();
    let roster = env.roster();
    let (stdout, stderr, code) = env.run(&[
        "score",
        "--participants",
        roster.to_str().unwrap(),
        "--date",
        "2026-02-25",
        "--team",
        "core",
    ]);
    assert_eq!(code, 0, "score failed: {stderr}");
    assert!(stdout.contains("Best slots for 2026-02-25 (2 participants)"));
    // Berlin and New York overlap from 14:00 UTC; the early bird boost makes 14:00 best
    let first_row = stdout.lines().find(|l| l.trim_start().starts_with("1 ")).unwrap();
    assert!(first_row.contains("14:00"), "unexpected first row: {first_row}");
}

#[test]
fn test_score_json() {
    let env = Env::new();
    let roster = env.roster();
    let (stdout, stderr, code) = env.run(&[
        "score",
        "-p",
        roster.to_str().unwrap(),
        "--date",
        "2026-02-25",
        "--json",
    ]);
    assert_eq!(code, 0, "score --json failed: {stderr}");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["date"], "2026-02-25");
    assert_eq!(parsed["slots"].as_array().unwrap().len(), 48);
    assert_eq!(parsed["ranked"].as_array().unwrap().len(), 48);
    // di has no timezone and is dropped by default
    assert_eq!(parsed["participants"].as_array().unwrap().len(), 3);
}

#[test]
fn test_score_allow_missing_timezone_and_yourself() {
    let env = Env::new();
    let roster = env.roster();
    let (stdout, _, code) = env.run(&[
        "score",
        "-p",
        roster.to_str().unwrap(),
        "--date",
        "2026-02-25",
        "--select",
        "cy",
        "--yourself",
        "di",
        "--allow-missing-timezone",
        "--json",
    ]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let names: Vec<&str> = parsed["participants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["cy", "di"]);
}

#[test]
fn test_heatmap() {
    let env = Env::new();
    let roster = env.roster();
    let (stdout, stderr, code) = env.run(&[
        "heatmap",
        "-p",
        roster.to_str().unwrap(),
        "--date",
        "2026-02-25",
        "--display-tz",
        "Europe/Berlin",
    ]);
    assert_eq!(code, 0, "heatmap failed: {stderr}");
    assert!(stdout.contains("(Europe/Berlin)"));
    assert!(stdout.contains("Summary:"));
    assert_eq!(stdout.lines().filter(|l| l.contains(" red ")).count(), 48);
}

#[test]
fn test_invalid_date_fails() {
    let env = Env::new();
    let roster = env.roster();
    let (_, stderr, code) = env.run(&["score", "-p", roster.to_str().unwrap(), "--date", "25.02.2026"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Invalid date"));
}

#[test]
fn test_bad_timezone_fails_whole_run() {
    let env = Env::new();
    let path = env.dir.path().join("bad.json");
    std::fs::write(&path, r#"[{"name":"x","timezone":"Nowhere/Land"}]"#).unwrap();
    let (_, stderr, code) = env.run(&["score", "-p", path.to_str().unwrap(), "--date", "2026-02-25"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Nowhere/Land"));
}

#[test]
fn test_bad_window_fails() {
    let env = Env::new();
    let path = env.dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{"name":"x","timezone":"UTC","blocked":[{"start":"9am","end":"10:00"}]}]"#,
    )
    .unwrap();
    let (_, stderr, code) = env.run(&["score", "-p", path.to_str().unwrap(), "--date", "2026-02-25"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid window format"));
}

#[test]
fn test_config_set_get_reset() {
    let env = Env::new();
    let (_, _, code) = env.run(&["config", "set", "defaults.top", "3"]);
    assert_eq!(code, 0);
    let (stdout, _, code) = env.run(&["config", "get", "defaults.top"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let (_, _, code) = env.run(&["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = env.run(&["config", "get", "defaults.top"]);
    assert_eq!(stdout.trim(), "5");
}

#[test]
fn test_config_unknown_key() {
    let env = Env::new();
    let (_, stderr, code) = env.run(&["config", "get", "defaults.colour"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_top_limits_rows() {
    let env = Env::new();
    env.run(&["config", "set", "defaults.top", "2"]);
    let roster = env.roster();
    let (stdout, _, code) = env.run(&["score", "-p", roster.to_str().unwrap(), "--date", "2026-02-25"]);
    assert_eq!(code, 0);
    assert!(stdout.lines().any(|l| l.trim_start().starts_with("2 ")));
    assert!(!stdout.lines().any(|l| l.trim_start().starts_with("3 ")));
}
