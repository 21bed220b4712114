//! Smoke tests of the `clipreel` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn clipreel() -> Command {
    let mut cmd = Command::cargo_bin("clipreel").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("CLIPREEL_CONFIG");
    cmd
}

#[test]
fn test_build_prints_text_and_token() {
    clipreel()
        .args([
            "build",
            "--entry",
            "https://youtu.be/abc@00:00:10@00:00:15",
            "--entry",
            "https://www.youtube.com/watch?v=xyz",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Playlist: abc,00:00:10,00:00:15$xyz,Full,Full"))
        .stdout(predicate::str::contains(
            "Token: YWJjLDAwOjAwOjEwLDAwOjAwOjE1JHh5eixGdWxsLEZ1bGw=",
        ));
}

#[test]
fn test_build_reports_invalid_entries() {
    clipreel()
        .args([
            "build",
            "--token-only",
            "--entry",
            "https://vimeo.com/1",
            "--entry",
            "https://youtu.be/a",
        ])
        .assert()
        .success()
        .stdout("YSxGdWxsLEZ1bGw=\n")
        .stderr(predicate::str::contains("Skipped 'https://vimeo.com/1'"));
}

#[test]
fn test_build_fails_without_valid_entries() {
    clipreel()
        .args(["build", "--entry", "https://vimeo.com/1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No valid clips to share"));
}

#[test]
fn test_inspect_lists_watch_links() {
    clipreel()
        .args(["inspect", "YSxGdWxsLEZ1bGw="])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. a (Start: Full, End: Full)"))
        .stdout(predicate::str::contains("https://youtube.com/watch?v=a"));
}

#[test]
fn test_inspect_json() {
    clipreel()
        .args(["inspect", "YSxGdWxsLEZ1bGw=", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reference\": \"a\""));
}

#[test]
fn test_inspect_rejects_malformed_token() {
    clipreel()
        .args(["inspect", "%%%"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode share token"));
}

#[test]
fn test_time_converts_both_ways() {
    clipreel()
        .args(["time", "3661"])
        .assert()
        .success()
        .stdout("01:01:01\n");
    clipreel()
        .args(["time", "00:02:05"])
        .assert()
        .success()
        .stdout("125\n");
}

#[test]
fn test_play_empty_token_stops_immediately() {
    clipreel()
        .args(["play", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("playlist is empty"));
}

#[test]
fn test_play_stops_after_cycles() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[clipreel]\nsurface_start_delay_ms = 0\nposition_poll_ms = 0").unwrap();

    // "a,00:00:00,00:00:01"
    clipreel()
        .args(["--config", config.path().to_str().unwrap()])
        .args(["play", "YSwwMDowMDowMCwwMDowMDowMQ==", "--cycles", "1"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Now playing clip 1: a"))
        .stdout(predicate::str::contains("requested cycles completed"))
        .stdout(predicate::str::contains("stale signals ignored"));
}

#[test]
fn test_config_file_is_reported_at_its_log_level() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "[clipreel]\nlog_level = \"debug\"").unwrap();

    clipreel()
        .args(["--config", config.path().to_str().unwrap(), "time", "5"])
        .assert()
        .success()
        .stdout("00:00:05\n")
        .stderr(predicate::str::contains("Loaded configuration from"))
        .stderr(predicate::str::contains("Configuration hierarchy initialized"));
}

#[test]
fn test_inspect_accepts_wrapped_token() {
    clipreel()
        .args(["inspect", "YSxG\ndWxs LEZ1bGw="])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. a (Start: Full, End: Full)"));
}

#[test]
fn test_invalid_config_value_fails() {
    clipreel()
        .env("CLIPREEL_LOG_LEVEL", "loud")
        .args(["time", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
}
