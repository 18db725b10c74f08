//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

/// Binary with a clean, deterministic environment
fn botsite() -> Command {
    let mut cmd = Command::cargo_bin("botsite").unwrap();
    cmd.env_clear()
        .env("SERVER_NAME", "pytest.local")
        .env("BOT_API_KEY", "abcdefg")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    botsite()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("routes"));
}

#[test]
fn test_serve_help() {
    botsite()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--in-memory"));
}

#[test]
fn test_config_masks_secrets() {
    botsite()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("pytest.local"))
        .stdout(predicate::str::contains("<set>"))
        .stdout(predicate::str::contains("abcdefg").not());
}

#[test]
fn test_config_json() {
    botsite()
        .args(["config", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"BOT_API_KEY\": \"<set>\""));
}

#[test]
fn test_invalid_log_level_fails() {
    botsite()
        .env("LOG_LEVEL", "chatty")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOG_LEVEL"));
}

#[test]
fn test_routes_lists_every_subdomain() {
    botsite()
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("api.pytest.local"))
        .stdout(predicate::str::contains("staff.pytest.local"))
        .stdout(predicate::str::contains("/asana/{asana_key}"));
}

#[test]
fn test_migrate_without_database_url_fails() {
    botsite()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}
