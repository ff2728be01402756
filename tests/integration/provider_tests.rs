//! Integration tests for the fact-export file provider.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use unusedsym::model::PackageId;
use unusedsym::{
    CheckError, Checker, FileModelProvider, LoadOptions, Mode, ModelBuilder, ModelProvider,
    ProgramModel,
};

fn write_export(root: &Path, name: &str, model: &ProgramModel) {
    let json = serde_json::to_string_pretty(model).expect("model serializes");
    fs::write(root.join(name), json).expect("export written");
}

fn demo_model() -> ProgramModel {
    let mut b = ModelBuilder::new();
    let demo = b.package("example.com/demo", "demo");
    b.function(&demo, "helper", "demo.go", 3);
    b.build()
}

#[test]
fn test_resolves_and_loads_from_a_fact_export() {
    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "demo.facts.json", &demo_model());

    let mut provider = FileModelProvider::new(dir.path());
    let unused = Checker::new(Mode::all())
        .check(&mut provider, &["example.com/demo".to_string()])
        .unwrap();

    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].name, "helper");
}

#[test]
fn test_exports_in_subdirectories_are_discovered() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("out/nested")).unwrap();
    write_export(&dir.path().join("out/nested"), "demo.facts.json", &demo_model());

    let mut provider = FileModelProvider::new(dir.path());
    let ids = provider
        .resolve_packages(&["example.com/demo".to_string()])
        .unwrap();
    assert_eq!(ids, vec![PackageId::new("example.com/demo")]);
}

#[test]
fn test_relative_identifiers_resolve_against_known_paths() {
    let dir = TempDir::new().unwrap();
    let mut b = ModelBuilder::new();
    b.package("example.com/demo/util", "util");
    write_export(dir.path(), "demo.facts.json", &b.build());

    let mut provider = FileModelProvider::new(dir.path());
    let ids = provider
        .resolve_packages(&["./demo/util".to_string()])
        .unwrap();
    assert_eq!(ids, vec![PackageId::new("example.com/demo/util")]);
}

#[test]
fn test_unknown_package_is_a_resolution_error() {
    let dir = TempDir::new().unwrap();
    write_export(dir.path(), "demo.facts.json", &demo_model());

    let mut provider = FileModelProvider::new(dir.path());
    let err = provider
        .resolve_packages(&["example.com/missing".to_string()])
        .unwrap_err();
    assert!(matches!(err, CheckError::Resolution { .. }));
}

#[test]
fn test_test_variants_follow_their_base_package() {
    let dir = TempDir::new().unwrap();
    let mut b = ModelBuilder::new();
    let demo = b.package("example.com/demo", "demo");
    b.test_package("example.com/demo_test", "demo_test", &demo);
    write_export(dir.path(), "demo.facts.json", &b.build());

    let ids = vec![PackageId::new("example.com/demo")];

    let mut provider = FileModelProvider::new(dir.path());
    let with_tests = provider
        .load(&ids, LoadOptions::default())
        .unwrap();
    assert_eq!(with_tests.packages.len(), 2);

    let without_tests = provider
        .load(
            &ids,
            LoadOptions {
                include_test_variants: false,
                suppress_diagnostics: true,
            },
        )
        .unwrap();
    assert_eq!(without_tests.packages.len(), 1);
}

#[test]
fn test_packages_spanning_exports_cannot_be_loaded_together() {
    let dir = TempDir::new().unwrap();
    let mut first = ModelBuilder::new();
    first.package("example.com/app", "app");
    write_export(dir.path(), "app.facts.json", &first.build());

    let mut second = ModelBuilder::new();
    second.package("example.com/lib", "lib");
    write_export(dir.path(), "lib.facts.json", &second.build());

    let mut provider = FileModelProvider::new(dir.path());
    let ids = vec![
        PackageId::new("example.com/app"),
        PackageId::new("example.com/lib"),
    ];
    let err = provider.load(&ids, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, CheckError::Load { .. }));
}

#[test]
fn test_malformed_export_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.facts.json"), "{not json").unwrap();

    let mut provider = FileModelProvider::new(dir.path());
    let err = provider
        .resolve_packages(&["example.com/demo".to_string()])
        .unwrap_err();
    assert!(matches!(err, CheckError::Load { .. }));
}

#[test]
fn test_recorded_diagnostics_do_not_change_results() {
    let dir = TempDir::new().unwrap();
    let mut b = ModelBuilder::new();
    let demo = b.package("example.com/demo", "demo");
    b.function(&demo, "helper", "demo.go", 3);
    b.diagnostic(&demo, "demo.go:7:2: declared and not used: x");
    write_export(dir.path(), "demo.facts.json", &b.build());

    let identifiers = vec!["example.com/demo".to_string()];

    let mut quiet_provider = FileModelProvider::new(dir.path());
    let quiet = Checker::new(Mode::all())
        .check(&mut quiet_provider, &identifiers)
        .unwrap();

    let mut verbose_provider = FileModelProvider::new(dir.path());
    let verbose = Checker::new(Mode::all())
        .with_verbose(true)
        .check(&mut verbose_provider, &identifiers)
        .unwrap();

    assert_eq!(
        quiet.iter().map(|s| &s.name).collect::<Vec<_>>(),
        verbose.iter().map(|s| &s.name).collect::<Vec<_>>()
    );
}
