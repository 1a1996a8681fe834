//! Focused CLI argument parsing tests.
//!
//! Tests that verify command-line argument parsing and validation without
//! running large simulations.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command rooted in an empty project directory, with home and XDG config
/// pointed there too, so no stray config applies.
fn cli(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("causal-sim").unwrap();
    cmd.arg("--project-dir")
        .arg(project.path())
        .arg("--no-color")
        .env("HOME", project.path())
        .env("XDG_CONFIG_HOME", project.path());
    cmd
}

#[test]
fn version_command_succeeds() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("causal-sim"))
        .stdout(predicate::str::contains("1103515245"));
}

#[test]
fn version_flag_shows_version() {
    Command::cargo_bin("causal-sim")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("causal-sim"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("causal-sim")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("causal inference"));
}

#[test]
fn unknown_scenario_is_rejected() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .args(["run", "--scenario", "instrumental"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn unknown_sweep_kind_is_rejected() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .args(["sweep", "--kind", "mediation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sweep kind"));
}

#[test]
fn negative_noise_fails_validation() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .args(["generate", "--noise", "-1", "--seed", "1"])
        .assert()
        .failure();
}

#[test]
fn strength_outside_unit_interval_fails_validation() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .args(["generate", "--confounding", "1.5", "--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confounding_strength"));
}

#[test]
fn negative_seed_is_accepted() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .args(["generate", "-n", "5", "--seed", "-7"])
        .assert()
        .success();
}

#[test]
fn unknown_config_format_fails() {
    let project = TempDir::new().unwrap();

    cli(&project)
        .args(["config", "show", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
