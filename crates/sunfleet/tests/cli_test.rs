//! Integration tests for the `sunfleet` CLI binary.
//!
//! Everything runs against the built-in demo fleet; config lives in a
//! temp dir so tests never touch the user's real configuration.
#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `sunfleet` binary with env isolation.
fn sunfleet_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sunfleet");
    cmd.env("HOME", "/tmp/sunfleet-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sunfleet-cli-test-nonexistent")
        .env_remove("SUNFLEET_OUTPUT")
        .env_remove("SUNFLEET_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Same, pinned to an explicit config file.
fn sunfleet_with_config(path: &Path) -> assert_cmd::Command {
    let mut cmd = sunfleet_cmd();
    cmd.arg("--config").arg(path);
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn json_stdout(cmd: &mut assert_cmd::Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = sunfleet_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    sunfleet_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("vehicles")
            .and(predicate::str::contains("alerts"))
            .and(predicate::str::contains("simulate"))
            .and(predicate::str::contains("contact")),
    );
}

#[test]
fn test_version_flag() {
    sunfleet_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sunfleet"));
}

#[test]
fn test_completions_zsh() {
    sunfleet_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_invalid_output_format() {
    let output = sunfleet_cmd()
        .args(["--output", "xml", "vehicles", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("possible values"));
}

// ── Fleet data ──────────────────────────────────────────────────────

#[test]
fn test_vehicles_list_json() {
    let v = json_stdout(sunfleet_cmd().args(["-o", "json", "vehicles", "list"]));
    let vehicles = v.as_array().unwrap();
    assert_eq!(vehicles.len(), 8);
    assert_eq!(vehicles[0]["id"], "vehicle-1");
    assert_eq!(vehicles[0]["licensePlate"], "CO-SUN-001");
}

#[test]
fn test_vehicles_list_filters() {
    let output = sunfleet_cmd()
        .args(["-o", "plain", "vehicles", "list", "--status", "active"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.lines().count(), 5);

    sunfleet_cmd()
        .args(["-o", "plain", "vehicles", "list", "--search", "telluride"])
        .assert()
        .success()
        .stdout("vehicle-3\n");
}

#[test]
fn test_vehicles_list_table() {
    sunfleet_cmd()
        .args(["--color", "never", "vehicles", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sunshine Van 01")
                .and(predicate::str::contains("Plate"))
                .and(predicate::str::contains("maintenance")),
        );
}

#[test]
fn test_vehicle_get_by_plate() {
    sunfleet_cmd()
        .args(["vehicles", "get", "co-sun-005"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Sunshine Sedan 01")
                .and(predicate::str::contains("Denver Service Center")),
        );
}

#[test]
fn test_vehicle_not_found_exit_code() {
    let output = sunfleet_cmd()
        .args(["vehicles", "get", "vehicle-99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("vehicle-99"));
}

#[test]
fn test_invalid_status_is_usage_error() {
    let output = sunfleet_cmd()
        .args(["vehicles", "list", "--status", "parked"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_alerts_unacknowledged() {
    let v = json_stdout(sunfleet_cmd().args(["-o", "json", "alerts", "list", "--unacknowledged"]));
    let alerts = v.as_array().unwrap();
    assert_eq!(alerts.len(), 5);
    assert!(alerts.iter().all(|a| a["acknowledged"] == false));
}

#[test]
fn test_drivers_trips_maintenance() {
    let drivers = json_stdout(sunfleet_cmd().args(["-o", "json", "drivers", "list"]));
    assert_eq!(drivers.as_array().unwrap().len(), 8);

    let trips = json_stdout(sunfleet_cmd().args(["-o", "json", "trips", "list"]));
    assert_eq!(trips.as_array().unwrap().len(), 5);

    let maint = json_stdout(sunfleet_cmd().args(["-o", "json", "maintenance", "list"]));
    assert_eq!(maint.as_array().unwrap().len(), 6);
}

#[test]
fn test_summary_json() {
    let v = json_stdout(sunfleet_cmd().args(["-o", "json", "summary"]));
    assert_eq!(v["total"], 8);
    assert_eq!(v["active"], 5);
    assert_eq!(v["unacknowledged"], 5);
}

// ── Simulation ──────────────────────────────────────────────────────

#[test]
fn test_simulate_is_reproducible_with_seed() {
    let run = || {
        sunfleet_cmd()
            .args([
                "-o",
                "json",
                "simulate",
                "--ticks",
                "200",
                "--seed",
                "42",
                "--at",
                "2026-03-01T12:00:00Z",
                "--show",
                "summary",
            ])
            .output()
            .unwrap()
    };
    let first = run();
    let second = run();
    assert!(first.status.success(), "{}", combined_output(&first));
    assert_eq!(first.stdout, second.stdout);

    let v: serde_json::Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(v["ticks"], 200);
    assert_eq!(v["seed"], 42);
}

#[test]
fn test_simulate_vehicles_stay_in_bounds() {
    let v = json_stdout(sunfleet_cmd().args([
        "-o", "json", "simulate", "--ticks", "100", "--seed", "7", "--show", "vehicles",
    ]));
    for vehicle in v.as_array().unwrap() {
        assert!(vehicle["speed"].as_f64().unwrap() >= 0.0);
        assert!(vehicle["fuelLevel"].as_f64().unwrap() >= 0.0);
        if vehicle["status"] != "active" {
            assert_eq!(vehicle["speed"].as_f64().unwrap(), 0.0);
        }
    }
}

#[test]
fn test_simulate_alert_list_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[simulation]\nalert_probability = 1.0\n").unwrap();

    let v = json_stdout(sunfleet_with_config(&path).args([
        "-o", "json", "simulate", "--ticks", "50", "--seed", "1", "--show", "alerts",
    ]));
    assert_eq!(v.as_array().unwrap().len(), 20);
}

#[test]
fn test_simulate_zero_probability_raises_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[simulation]\nalert_probability = 0.0\n").unwrap();

    let v = json_stdout(sunfleet_with_config(&path).args([
        "-o", "json", "simulate", "--ticks", "30", "--seed", "3",
    ]));
    assert_eq!(v["raised"].as_array().unwrap().len(), 0);
}

// ── Contact ─────────────────────────────────────────────────────────

#[test]
fn test_contact_submit() {
    sunfleet_cmd()
        .args([
            "-o",
            "plain",
            "contact",
            "submit",
            "--name",
            "John Doe",
            "--phone",
            "(970) 555-0123",
            "--email",
            "john@example.com",
            "--message",
            "Need a ride to the airport",
            "--service",
            "airport",
            "--delay-ms",
            "10",
        ])
        .assert()
        .success()
        .stdout("submitted\n");
}

#[test]
fn test_contact_invalid_email() {
    let output = sunfleet_cmd()
        .args([
            "contact",
            "submit",
            "--name",
            "John Doe",
            "--phone",
            "555",
            "--email",
            "not-an-email",
            "--message",
            "hi",
            "--delay-ms",
            "0",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("not-an-email"));
}

#[test]
fn test_contact_info() {
    sunfleet_cmd()
        .args(["contact", "info"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("970-777-7777")
                .and(predicate::str::contains("rides@sunshinerides.co"))
                .and(predicate::str::contains("Telluride")),
        );
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    sunfleet_with_config(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_show_without_file() {
    sunfleet_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[simulation]")
                .and(predicate::str::contains("tick_interval_ms = 5000")),
        );
}

#[test]
fn test_config_init_then_refuse_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("config.toml");

    sunfleet_with_config(&path)
        .args(["config", "init"])
        .assert()
        .success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("alert_capacity = 20"));

    let output = sunfleet_with_config(&path)
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--force"));

    sunfleet_with_config(&path)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[simulation]\nalert_capacity = 0\n").unwrap();

    let output = sunfleet_with_config(&path)
        .args(["summary"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("alert_capacity"));
}

#[test]
fn test_config_default_output_applies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[defaults]\noutput = \"json\"\n").unwrap();

    let v = json_stdout(sunfleet_with_config(&path).args(["summary"]));
    assert_eq!(v["total"], 8);
}
