//! Decoding and re-encoding derived models.

mod common;

use anyhow::{Result, ensure};
use common::TestModel;
use modelmap::{MappingError, Model};
use rstest::rstest;
use serde_json::{Value, json};

#[test]
fn decodes_every_mapped_field() -> Result<()> {
    let model = TestModel::from_wire_value(&json!({
        "name": "foo",
        "count": "5",
        "nested": {"name": "bar"},
    }))?;
    ensure!(model.name == "foo", "name");
    ensure!(model.count == 5, "count");
    ensure!(model.nested_name.as_deref() == Some("bar"), "nested name");
    Ok(())
}

#[rstest]
#[case::full(json!({"name": "foo", "count": "5", "nested": {"name": "bar"}}))]
#[case::null_nested(json!({"name": "foo", "count": "0", "nested": {"name": null}}))]
fn re_encoding_reproduces_mapped_keys(#[case] wire: Value) -> Result<()> {
    let model = TestModel::from_wire_value(&wire)?;
    ensure!(Value::Object(model.to_wire()?) == wire, "wire changed");
    Ok(())
}

#[test]
fn absent_values_are_written_as_null() -> Result<()> {
    let model = TestModel {
        name: "foo".to_owned(),
        ..TestModel::default()
    };
    let wire = Value::Object(model.to_wire()?);
    ensure!(
        wire == json!({"name": "foo", "count": "0", "nested": {"name": null}}),
        "unexpected wire {wire}"
    );
    Ok(())
}

#[test]
fn weak_fields_never_reach_the_wire() -> Result<()> {
    let wire = TestModel::default().to_wire()?;
    ensure!(!wire.contains_key("weak_model"), "weak field encoded");
    Ok(())
}

#[test]
fn transformer_failures_abort_decoding() -> Result<()> {
    let err = TestModel::from_wire_value(&json!({"name": "foo", "count": "many"}))
        .expect_err("count is not numeric");
    ensure!(
        matches!(err, MappingError::FieldTransformFailed { ref field, .. } if field == "count"),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[test]
fn key_path_conflicts_abort_decoding() -> Result<()> {
    let err = TestModel::from_wire_value(&json!({"name": "foo", "nested": "bar"}))
        .expect_err("nested is not an object");
    ensure!(err.field() == Some("nested_name"), "unexpected field {:?}", err.field());
    Ok(())
}

#[test]
fn decoded_arrays_keep_order() -> Result<()> {
    let models: Vec<TestModel> = modelmap::mapper::from_wire_array(&[
        json!({"name": "a"}),
        json!({"name": "b"}),
    ])?;
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    ensure!(names == ["a", "b"], "unexpected names {names:?}");
    Ok(())
}
