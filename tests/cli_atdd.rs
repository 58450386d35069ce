#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn gpas_in(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gpas").expect("binary should compile");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .env_remove("GITHUB_TOKEN");
    cmd
}

/// Three originals and one fork, varied messages and hours over several days,
/// equal star rates, two languages and some collaboration: nothing fires.
const HEALTHY_BUNDLE: &str = r#"{
  "profile": {"login": "octocat", "name": "Mona", "followers": 40, "following": 5,
              "public_repos": 4, "created_at": "2015-01-01T00:00:00Z"},
  "repos": [
    {"name": "a", "is_fork": false, "star_count": 0, "created_at": "2020-01-01T00:00:00Z"},
    {"name": "b", "is_fork": false, "star_count": 0, "created_at": "2021-01-01T00:00:00Z"},
    {"name": "c", "is_fork": true,  "star_count": 0, "created_at": "2022-01-01T00:00:00Z"},
    {"name": "d", "is_fork": false, "star_count": 0, "created_at": "2023-01-01T00:00:00Z"}
  ],
  "commit_samples": [
    {"timestamp": "2024-04-01T08:10:00Z", "message": "Add parser"},
    {"timestamp": "2024-04-02T11:20:00Z", "message": "Fix lexer bug"},
    {"timestamp": "2024-04-03T14:30:00Z", "message": "Write docs"},
    {"timestamp": "2024-04-04T17:40:00Z", "message": "Refactor scorer"},
    {"timestamp": "2024-04-05T21:50:00Z", "message": "Bump version"}
  ],
  "language_byte_totals": {"Rust": 12000, "Python": 800},
  "collaboration_event_count": 3
}"#;

/// All forks, every dated commit on one day at one hour with the same message,
/// no languages and no collaboration.
const BOT_BUNDLE: &str = r#"{
  "profile": {"login": "farm"},
  "repos": [
    {"name": "x", "is_fork": true, "star_count": 0, "created_at": "2024-01-01T00:00:00Z"},
    {"name": "y", "is_fork": true, "star_count": 0, "created_at": "2024-01-01T00:00:00Z"}
  ],
  "commit_samples": [
    {"timestamp": "2024-04-01T03:00:00Z", "message": "update"},
    {"timestamp": "2024-04-01T03:05:00Z", "message": "Update."},
    {"timestamp": "2024-04-01T03:10:00Z", "message": "update!"},
    {"timestamp": "not a date", "message": "update"}
  ],
  "language_byte_totals": {},
  "collaboration_event_count": 0
}"#;

#[test]
fn analyze_healthy_bundle_scores_full_marks() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), HEALTHY_BUNDLE).expect("bundle should write");

    gpas_in(dir.path())
        .args(["analyze", "octocat", "--bundle", "bundle.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("User: octocat"))
        .stdout(predicate::str::contains("Authenticity score: 100/100"))
        .stdout(predicate::str::contains("  - forks_ratio: 0.25"))
        .stdout(predicate::str::contains("Why:\n  - none"));
}

#[test]
fn analyze_bot_bundle_lists_penalties_in_rule_order() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), BOT_BUNDLE).expect("bundle should write");

    let assert = gpas_in(dir.path())
        .args(["analyze", "farm", "--bundle", "bundle.json", "--format", "json"])
        .assert()
        .code(0);

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("stdout should be json");
    assert_eq!(report["user"], "farm");
    assert_eq!(report["score"], 35);
    assert_eq!(report["features"]["commit_count_sampled"], 3);
    assert_eq!(report["features"]["original_repos"], 0);
    assert_eq!(
        report["explanations"],
        serde_json::json!([
            "-15 Mostly forks, very few original repos",
            "-10 Highly bursty commit pattern (many commits in one day)",
            "-10 Low variety in commit messages",
            "-10 Contribution timing entropy is too low",
            "-10 Very low collaboration activity (issues/PR/reviews)",
            "-10 Very low language diversity"
        ])
    );
}

#[test]
fn analyze_reports_the_login_recorded_in_the_bundle() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), BOT_BUNDLE).expect("bundle should write");

    gpas_in(dir.path())
        .args(["analyze", "someone-else", "--bundle", "bundle.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("User: farm"))
        .stderr(predicate::str::contains("bundle belongs to a different login"));
}

#[test]
fn analyze_empty_bundle_does_not_fail() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), "{}").expect("bundle should write");

    gpas_in(dir.path())
        .args(["analyze", "nobody", "--bundle", "bundle.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Authenticity score: 60/100"));
}

#[test]
fn analyze_fail_under_sets_exit_code() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), BOT_BUNDLE).expect("bundle should write");

    gpas_in(dir.path())
        .args([
            "analyze",
            "farm",
            "--bundle",
            "bundle.json",
            "--fail-under",
            "50",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("below threshold 50"));
}

#[test]
fn analyze_missing_bundle_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");

    gpas_in(dir.path())
        .args(["analyze", "octocat", "--bundle", "missing.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn analyze_malformed_bundle_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), "{ not json").expect("bundle should write");

    gpas_in(dir.path())
        .args(["analyze", "octocat", "--bundle", "bundle.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("json error"));
}

#[test]
fn fetch_rejects_invalid_project_config_before_network() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("gpas.toml"),
        "[sampling]\nmax_repos = 50\n",
    )
    .expect("config should write");

    gpas_in(dir.path())
        .args(["fetch", "octocat", "--out", "capture.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sampling.max_repos"));
    assert!(!dir.path().join("capture.json").exists());
}

#[test]
fn rescore_fork_farm_features() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("features.json"),
        r#"{"forks_ratio": 0.95, "original_repos": 1, "commit_burst_index": 0.3,
            "msg_uniqueness": 0.7, "stars_spike_z": 0.5, "heatmap_entropy": 0.6,
            "collab_ratio": 0.3, "lang_diversity": 0.5}"#,
    )
    .expect("features should write");

    gpas_in(dir.path())
        .args(["rescore", "features.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Authenticity score: 85/100"))
        .stdout(predicate::str::contains(
            "  -15 Mostly forks, very few original repos",
        ));
}

#[test]
fn rescore_accepts_previous_json_report() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("bundle.json"), BOT_BUNDLE).expect("bundle should write");

    let first = gpas_in(dir.path())
        .args(["analyze", "farm", "--bundle", "bundle.json", "--format", "json"])
        .assert()
        .code(0);
    fs::write(dir.path().join("report.json"), &first.get_output().stdout)
        .expect("report should write");

    gpas_in(dir.path())
        .args(["rescore", "report.json", "--format", "json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"user\": \"farm\""))
        .stdout(predicate::str::contains("\"score\": 35"));
}

#[test]
fn rescore_with_missing_keys_uses_safe_defaults() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("features.json"), r#"{"collab_ratio": 0.01}"#)
        .expect("features should write");

    gpas_in(dir.path())
        .args(["rescore", "features.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Authenticity score: 90/100"))
        .stdout(predicate::str::contains("-10 Very low collaboration activity"));
}

#[test]
fn rescore_rejects_non_object_document() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(dir.path().join("features.json"), "[1, 2, 3]").expect("features should write");

    gpas_in(dir.path())
        .args(["rescore", "features.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected a JSON object"));
}
