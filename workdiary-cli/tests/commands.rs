use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const URL: &str = "https://docs.google.com/spreadsheets/d/abc123/edit";

fn workdiary_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("workdiary"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn dates_lists_every_day_of_leap_february() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["dates", "--date", "2024-02-15"])
        .assert()
        .success()
        .stdout(contains("2024年02月 (29 days)"))
        .stdout(contains("2024-02-01"))
        .stdout(contains("2024-02-29"))
        .stdout(contains("Thu"))
        .stdout(contains("AD"));
}

#[test]
fn dates_stops_at_month_end() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["dates", "--date", "2023-02-01"])
        .assert()
        .success()
        .stdout(contains("2023年02月 (28 days)"))
        .stdout(contains("2023-02-28"))
        .stdout(contains("2023-03-01").not())
        .stdout(contains("2023-02-29").not());
}

#[test]
fn dates_rejects_malformed_date() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["dates", "--date", "2024-02-30"])
        .assert()
        .failure();
}

#[test]
fn init_writes_config_and_refuses_overwrite() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["init", "--document-url", URL, "--credentials", "/secrets/token.json"])
        .assert()
        .success()
        .stdout(contains("✓ Wrote config"));

    let path = home.path().join(".workdiary").join("config.yaml");
    let written = std::fs::read_to_string(&path).expect("config written");
    assert!(written.contains(URL));
    assert!(written.contains("工作日誌列表"));

    workdiary_cmd(home.path())
        .args(["init", "--document-url", URL, "--credentials", "/secrets/token.json"])
        .assert()
        .failure()
        .stderr(contains("already exists"))
        .stderr(contains("--force"));

    workdiary_cmd(home.path())
        .args([
            "init",
            "--document-url",
            URL,
            "--credentials",
            "/secrets/other.json",
            "--force",
        ])
        .assert()
        .success();
    let rewritten = std::fs::read_to_string(&path).expect("config");
    assert!(rewritten.contains("/secrets/other.json"));
}

#[test]
fn init_honours_config_override() {
    let home = TempDir::new().expect("home");
    let custom = home.path().join("team").join("diary.yaml");
    workdiary_cmd(home.path())
        .args(["init", "--document-url", URL, "--credentials", "/t.json", "--config"])
        .arg(&custom)
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!home.path().join(".workdiary").exists());
}

#[test]
fn init_rejects_blank_document_url() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["init", "--document-url", " ", "--credentials", "/t.json"])
        .assert()
        .failure()
        .stderr(contains("document_url"));
}

#[test]
fn sync_without_config_points_to_init() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["sync", "--date", "2024-02-15"])
        .assert()
        .failure()
        .stderr(contains("✗"))
        .stderr(contains("workdiary init"));
}

#[test]
fn plan_with_missing_credentials_fails_before_network() {
    let home = TempDir::new().expect("home");
    workdiary_cmd(home.path())
        .args(["init", "--document-url", URL, "--credentials", "/nonexistent/token.json"])
        .assert()
        .success();

    workdiary_cmd(home.path())
        .args(["plan", "--date", "2024-02-15"])
        .assert()
        .failure()
        .stderr(contains("/nonexistent/token.json"));
}
