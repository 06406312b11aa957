use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "dominion_cli_test_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Runs the binary against the store in `dir` with extra arguments.
fn run(dir: &TempDir, args: &[&str]) -> Output {
    let db = dir.join("cards.db");
    Command::new(env!("CARGO_BIN_EXE_dominion-catalog"))
        .arg("--db")
        .arg(&db)
        .args(args)
        .output()
        .expect("failed to run dominion-catalog")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[test]
fn query_filters_with_bound_arguments() {
    let dir = TempDir::new("query_filter");
    let output = run(
        &dir,
        &[
            "query",
            "--projection",
            "name",
            "--selection",
            "expansion = ?",
            "--arg",
            "Alchemy",
            "--sort",
            "name",
        ],
    );
    assert!(output.status.success(), "query should succeed");

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "name");
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[1], "Alchemist");
    assert!(dir.join("cards.db").exists(), "first query builds the store");
}

#[test]
fn query_json_output_keeps_column_types() {
    let dir = TempDir::new("query_json");
    let output = run(
        &dir,
        &[
            "query",
            "--projection",
            "id,name",
            "--selection",
            "id = ?",
            "--arg",
            "161",
            "--format",
            "json",
        ],
    );
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows, serde_json::json!([{ "id": 161, "name": "Young Witch" }]));
}

#[test]
fn query_with_invalid_selection_fails() {
    let dir = TempDir::new("query_invalid");
    let output = run(&dir, &["query", "--selection", "no_such_column = 1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Query failed"), "stderr: {stderr}");
}

#[test]
fn card_prints_fields() {
    let dir = TempDir::new("card_lookup");
    let output = run(&dir, &["card", "1"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("id: 1\nname: Black Market\n"), "{text}");

    let missing = run(&dir, &["card", "9999"]);
    assert!(!missing.status.success());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn status_does_not_build_the_store() {
    let dir = TempDir::new("status_empty");
    let output = run(&dir, &["status", "--format", "json"]);
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["exists"], false);
    assert_eq!(status["stored_version"], 0);
    assert_eq!(status["declared_version"], 7);
    assert!(!dir.join("cards.db").exists());
}

#[test]
fn rebuild_then_status_reports_version() {
    let dir = TempDir::new("rebuild_status");
    let rebuild = run(&dir, &["--data-version", "8", "rebuild"]);
    assert!(rebuild.status.success());
    assert!(stdout(&rebuild).contains("Total cards: 206"));

    let output = run(&dir, &["--data-version", "8", "status", "--format", "json"]);
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["table_exists"], true);
    assert_eq!(status["stored_version"], 8);
    assert_eq!(status["card_count"], 206);
    assert!(status["modified"].is_string());
}

#[test]
fn config_file_selects_store() {
    let dir = TempDir::new("config_file");
    let db = dir.join("from-config.db");
    let config = dir.join("catalog.yml");
    fs::write(&config, format!("database: {}\nversion: 9\n", db.display())).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dominion-catalog"))
        .arg("--config")
        .arg(&config)
        .args(["query", "--projection", "COUNT(*)", "--sort", ""])
        .output()
        .expect("failed to run dominion-catalog");
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().nth(1), Some("206"));
    assert!(db.exists());
}

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

#[test]
fn type_prints_card_mime() {
    let dir = TempDir::new("type_mime");
    let output = run(&dir, &["type"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "ca.marklauman.dominionpicker.card");
    assert!(!dir.join("cards.db").exists());
}
