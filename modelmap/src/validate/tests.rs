//! Unit tests for validation reports and the validator.

use super::*;
use crate::descriptor::{FieldAccessor, FieldDescriptor, FieldValidation, TableBuilder};
use anyhow::{Result, ensure};
use rstest::rstest;

#[derive(Clone, Default)]
struct Window {
    title: String,
    width: u32,
    min_width: u32,
}

fn title_present(window: &Window) -> bool {
    !window.title.is_empty()
}

impl Model for Window {
    fn declare(table: &mut TableBuilder<Self>) {
        table
            .field(
                FieldDescriptor::new(
                    "title",
                    FieldAccessor::<Self>::stored(|w| &w.title, |w| &mut w.title),
                )
                .validate(FieldValidation::new(title_present, "must not be empty"))
                .validate(FieldValidation::new(
                    |w: &Self| w.title.len() < 10,
                    "must be shorter than 10 characters",
                )),
            )
            .field(FieldDescriptor::new(
                "width",
                FieldAccessor::<Self>::stored(|w| &w.width, |w| &mut w.width),
            ))
            .field(FieldDescriptor::new(
                "min_width",
                FieldAccessor::<Self>::stored(|w| &w.min_width, |w| &mut w.min_width),
            ))
            .validate_with(|w: &Self, report: &mut ValidationReport| {
                if w.width < w.min_width {
                    report.push_object("width is below the minimum");
                }
            });
    }
}

#[test]
fn valid_models_report_nothing() {
    let window = Window {
        title: "main".to_owned(),
        width: 10,
        min_width: 5,
    };
    let report = validate(&window);
    assert!(report.is_valid());
    assert!(report.into_result().is_ok());
}

#[test]
fn collects_every_failure_without_short_circuiting() -> Result<()> {
    let window = Window {
        title: String::new(),
        width: 1,
        min_width: 5,
    };
    let report = validate(&window);
    ensure!(report.len() == 2, "expected two failures, got {report}");
    let fields: Vec<Option<&str>> = report.iter().map(|e| e.field.as_deref()).collect();
    ensure!(fields == [Some("title"), None], "unexpected order {fields:?}");
    Ok(())
}

#[test]
fn reports_only_failing_field_validations() -> Result<()> {
    let window = Window {
        title: "an overly long title".to_owned(),
        ..Window::default()
    };
    let report = validate(&window);
    let messages: Vec<&str> = report.for_field("title").map(|e| e.message.as_str()).collect();
    ensure!(messages == ["must be shorter than 10 characters"], "got {messages:?}");
    Ok(())
}

#[test]
fn report_display_numbers_entries() {
    let mut report = ValidationReport::default();
    report.push_field("name", "must not be empty");
    report.push_object("start must precede end");
    assert_eq!(
        report.to_string(),
        "1: 'name': must not be empty\n2: start must precede end"
    );
}

#[test]
fn report_iterates_borrowed_and_owned() {
    let report = ValidationReport::new(vec![
        ValidationError::for_field("a", "x"),
        ValidationError::for_object("y"),
    ]);
    let borrowed: Vec<&ValidationError> = (&report).into_iter().collect();
    assert_eq!(borrowed.len(), 2);
    let owned: Vec<ValidationError> = report.into_iter().collect();
    assert_eq!(owned.last(), Some(&ValidationError::for_object("y")));
}

#[test]
fn into_result_returns_the_report_when_invalid() {
    let mut report = ValidationReport::default();
    report.extend([ValidationError::for_object("broken")]);
    let err = report.clone().into_result().expect_err("report has a failure");
    assert_eq!(err, report);
}

#[rstest]
#[case::field(ValidationError::for_field("title", "too long"), "'title': too long")]
#[case::object(ValidationError::for_object("width below minimum"), "width below minimum")]
fn validation_errors_name_their_field(#[case] err: ValidationError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
    let as_error: &dyn std::error::Error = &err;
    assert!(as_error.source().is_none());
}
