//! `courier sync --dry-run` must route and report without writing anywhere.
//!
//! The board API host is pointed at an unroutable local port, so the dedup
//! seed fetches fail fast and fall open; dry-run then reports would-creates
//! without issuing a single write.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn dry_run_sync_reports_would_creates_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("employees.json"),
        r#"[
            {"name": "Shagun", "department": ["Marketing", "Social Media"]},
            {"name": "Devin", "department": ["AI R&D"]}
        ]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("courier.yaml"),
        concat!(
            "departments:\n",
            "  Marketing:\n",
            "    board_id: m-1\n",
            "  Social Media:\n",
            "    board_id: s-1\n",
            "  AI R&D:\n",
            "    board_id: a-1\n",
        ),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("tasks.json"),
        r#"[{"text": "Shagun and Devin need to finalize the launch", "assignee": "Shagun"}]"#,
    )
    .unwrap();

    Command::cargo_bin("courier")
        .expect("binary built")
        .current_dir(dir.path())
        .env("COURIER_TOKEN", "test-token")
        .env("COURIER_API_URL", "http://127.0.0.1:9")
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run]"))
        .stdout(predicate::str::contains("3 synced"))
        .stdout(predicate::str::contains("1 cross-department"));
}

#[test]
fn sync_without_token_fails_before_any_work() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("employees.json"),
        r#"[{"name": "Devin", "department": ["AI R&D"]}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("courier.yaml"),
        "departments:\n  AI R&D:\n    board_id: a-1\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("tasks.json"), r#"[{"text": "ship it"}]"#).unwrap();

    Command::cargo_bin("courier")
        .expect("binary built")
        .current_dir(dir.path())
        .env_remove("COURIER_TOKEN")
        .args(["sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("COURIER_TOKEN"));
}

#[test]
fn sync_with_empty_batch_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("employees.json"),
        r#"[{"name": "Devin", "department": ["AI R&D"]}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("courier.yaml"),
        "departments:\n  AI R&D:\n    board_id: a-1\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("tasks.json"), "[]").unwrap();

    Command::cargo_bin("courier")
        .expect("binary built")
        .current_dir(dir.path())
        .env_remove("COURIER_TOKEN")
        .args(["sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks to sync."));
}
