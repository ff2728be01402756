//! CLI integration tests
//!
//! These tests verify that the CLI works correctly against on-disk fact
//! exports.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use unusedsym::{ModelBuilder, ProgramModel};

fn write_export(root: &Path, model: &ProgramModel) {
    let json = serde_json::to_string_pretty(model).expect("model serializes");
    fs::write(root.join("program.facts.json"), json).expect("export written");
}

fn unusedsym() -> Command {
    Command::cargo_bin("unusedsym").expect("binary builds")
}

#[test]
fn test_help_mentions_packages_and_fact_root() {
    unusedsym()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fact-root"))
        .stdout(predicate::str::contains("Packages to analyze"));
}

#[test]
fn test_findings_exit_nonzero_with_json_output() {
    let dir = TempDir::new().unwrap();
    let mut b = ModelBuilder::new();
    let demo = b.package("example.com/demo", "demo");
    b.function(&demo, "helper", "demo.go", 3);
    write_export(dir.path(), &b.build());

    unusedsym()
        .args([
            "example.com/demo",
            "--fact-root",
            &dir.path().display().to_string(),
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"helper\""));
}

#[test]
fn test_clean_package_exits_zero() {
    let dir = TempDir::new().unwrap();
    let mut b = ModelBuilder::new();
    let demo = b.package("example.com/demo", "demo");
    let helper = b.function(&demo, "helper", "demo.go", 3);
    b.use_symbol(&demo, helper);
    write_export(dir.path(), &b.build());

    unusedsym()
        .args([
            "example.com/demo",
            "--fact-root",
            &dir.path().display().to_string(),
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No unused symbols"));
}

#[test]
fn test_kind_flags_narrow_the_report() {
    let dir = TempDir::new().unwrap();
    let mut b = ModelBuilder::new();
    let demo = b.package("example.com/demo", "demo");
    b.function(&demo, "helper", "demo.go", 3);
    b.constant(&demo, "limit", "demo.go", 5);
    write_export(dir.path(), &b.build());

    unusedsym()
        .args([
            "example.com/demo",
            "--fact-root",
            &dir.path().display().to_string(),
            "--constants",
            "--format",
            "json",
            "--quiet",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"limit\""))
        .stdout(predicate::str::contains("\"helper\"").not());
}

#[test]
fn test_unknown_package_fails_with_resolution_error() {
    let dir = TempDir::new().unwrap();

    unusedsym()
        .args([
            "example.com/missing",
            "--fact-root",
            &dir.path().display().to_string(),
            "--quiet",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("example.com/missing"));
}

#[test]
fn test_no_packages_is_an_error() {
    unusedsym().arg("--quiet").assert().failure();
}
