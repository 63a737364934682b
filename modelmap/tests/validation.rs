//! Validation of derived models.

mod common;

use anyhow::{Result, anyhow, ensure};
use common::TestModel;
use modelmap::{MappingError, Model};
use serde_json::json;

#[test]
fn empty_name_reports_exactly_one_failure() -> Result<()> {
    let err = TestModel::from_wire_value(&json!({"name": ""}))
        .expect_err("empty names are invalid");
    let report = err
        .validation_report()
        .ok_or_else(|| anyhow!("expected a validation failure, got {err}"))?;
    ensure!(report.len() == 1, "expected one failure, got {report}");
    let failure = report.iter().next().ok_or_else(|| anyhow!("empty report"))?;
    ensure!(failure.field.as_deref() == Some("name"), "unexpected field");
    Ok(())
}

#[test]
fn short_name_is_valid() -> Result<()> {
    let model = TestModel::from_wire_value(&json!({"name": "ok"}))?;
    ensure!(model.validate().is_valid(), "expected a valid model");
    Ok(())
}

#[test]
fn long_name_fails_the_length_check() {
    let model = TestModel {
        name: "much too long".to_owned(),
        ..TestModel::default()
    };
    let report = model.validate();
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.to_string(),
        "1: 'name': must be shorter than 10 characters"
    );
}

#[test]
fn object_hook_runs_after_field_checks() {
    let model = TestModel {
        name: String::new(),
        count: 5_000,
        ..TestModel::default()
    };
    let report = model.validate();
    let fields: Vec<Option<&str>> = report.iter().map(|e| e.field.as_deref()).collect();
    assert_eq!(fields, [Some("name"), None]);
}

#[test]
fn defaults_are_validated_too() {
    let err = TestModel::with_defaults().expect_err("default name is empty");
    assert!(matches!(err, MappingError::Validation(ref report) if report.len() == 1));
}
