//! Contract file tests.
//!
//! Loads contract files from disk, registers their matchers and runs their
//! captured cases through the focus filter.

mod common;

use apicheck_contract::{
    ContractError, FocusFilter, HarnessConfig, MatcherRegistry, load_contract_file,
    loader::discover_contract_files, run_cases,
};
use serde_json::json;
use tempfile::TempDir;

use common::fixtures::{orders_contract, write_contract};

#[test]
fn test_load_and_register() {
    let dir = TempDir::new().unwrap();
    let path = write_contract(&dir, "orders.json", &orders_contract());

    let file = load_contract_file(&path).unwrap();
    assert_eq!(file.name, "orders-api");
    assert_eq!(file.matchers.len(), 1);
    assert_eq!(file.cases.len(), 3);

    let mut registry = MatcherRegistry::with_defaults();
    registry.register_file(&file).unwrap();
    assert!(registry.get("be_a_410").is_some());
}

#[test]
fn test_run_all_cases() {
    let dir = TempDir::new().unwrap();
    let path = write_contract(&dir, "orders.json", &orders_contract());
    let file = load_contract_file(&path).unwrap();

    let mut registry = MatcherRegistry::with_defaults();
    registry.register_file(&file).unwrap();

    let config = HarnessConfig::for_testing();
    let report = run_cases(
        &registry,
        &config.focus_filter(),
        &config.default_matcher,
        &file.cases,
    );

    assert_eq!(report.passed_count(), 2);
    assert_eq!(report.failed_count(), 1);
    let failed: Vec<_> = report.results.iter().filter(|r| !r.passed).collect();
    assert_eq!(failed[0].case_name, "legacy error code");
    assert!(failed[0].diagnostic.contains("expected error code 10000, got 9999"));
}

#[test]
fn test_run_focused_cases() {
    let dir = TempDir::new().unwrap();
    let path = write_contract(&dir, "orders.json", &orders_contract());
    let file = load_contract_file(&path).unwrap();

    let mut registry = MatcherRegistry::with_defaults();
    registry.register_file(&file).unwrap();

    let report = run_cases(
        &registry,
        &FocusFilter::new("legacy", true),
        "be_a_404",
        &file.cases,
    );

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.skipped, 2);
    assert!(!report.all_passed());
}

#[test]
fn test_invalid_json_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_contract_file(&path).unwrap_err();
    assert!(matches!(err, ContractError::Parse { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_invalid_pattern_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    let contract = json!({
        "name": "bad",
        "matchers": [
            {"name": "be_bad", "status": 400, "code": 1, "description": {"matches": "("}}
        ]
    });
    let path = write_contract(&dir, "bad.json", &contract);

    let err = load_contract_file(&path).unwrap_err();
    assert!(matches!(err, ContractError::InvalidPattern { pattern, .. } if pattern == "("));
}

#[test]
fn test_duplicate_matcher_in_file() {
    let dir = TempDir::new().unwrap();
    let contract = json!({
        "name": "shadowing",
        "matchers": [
            {"name": "be_a_404", "status": 404, "code": 1, "description": "Nope"}
        ]
    });
    let path = write_contract(&dir, "shadowing.json", &contract);
    let file = load_contract_file(&path).unwrap();

    let err = MatcherRegistry::with_defaults()
        .register_file(&file)
        .unwrap_err();
    assert!(matches!(err, ContractError::DuplicateMatcher { .. }));
}

#[test]
fn test_discover_contract_files() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    write_contract(&dir, "b.json", &json!({"name": "b"}));
    write_contract(&dir, "nested/a.json", &json!({"name": "a"}));
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let files = discover_contract_files(dir.path());
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.extension().unwrap() == "json"));
    assert!(files.iter().any(|f| f.ends_with("nested/a.json")));
}
