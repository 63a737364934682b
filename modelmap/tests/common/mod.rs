//! Shared test models for integration tests.
//!
//! The models are declared with `#[derive(Model)]` so every test file
//! exercises the derive end to end.

use std::sync::Weak;

use modelmap::transform::{TransformError, Transformer};
use modelmap::{Model, ValidationReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A model exercising the common field options.
#[derive(Clone, Debug, Default, Model)]
#[model(validate = check_test_model)]
pub struct TestModel {
    /// Required, and shorter than ten characters.
    #[model(
        validate(predicate = not_empty, message = "must not be empty"),
        validate(predicate = shorter_than_ten, message = "must be shorter than 10 characters")
    )]
    pub name: String,
    /// Decoded from a numeric string and merged by adding.
    #[model(with = numeric_string, merge = "add")]
    pub count: u64,
    /// Read from a nested object.
    #[model(key_path = "nested.name")]
    pub nested_name: Option<String>,
    /// Never mapped, merged or compared by value.
    pub weak_model: Weak<()>,
}

fn not_empty(name: &str) -> bool {
    !name.is_empty()
}

fn shorter_than_ten(name: &str) -> bool {
    name.chars().count() < 10
}

fn check_test_model(model: &TestModel, report: &mut ValidationReport) {
    if model.count > 1_000 {
        report.push_object("count is implausibly large");
    }
}

/// Numbers travel as decimal strings on the wire.
pub fn numeric_string() -> Transformer {
    Transformer::new(
        |value: Value| match value {
            Value::String(text) => text
                .parse::<u64>()
                .map(Value::from)
                .map_err(|err| {
                    TransformError::invalid(Value::String(text.clone()), err.to_string())
                }),
            other @ (Value::Null | Value::Number(_)) => Ok(other),
            other => Err(TransformError::invalid(other, "expected a numeric string")),
        },
        |value: Value| match value {
            Value::Number(number) => Ok(Value::String(number.to_string())),
            other => Ok(other),
        },
    )
    .with_label("numeric-string")
}

/// A nested model, serializable so it can travel inside a parent field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Model)]
#[model(rename_all = "camelCase")]
pub struct Owner {
    /// Login name.
    #[model(validate(predicate = not_empty, message = "must not be empty"))]
    pub login: String,
    /// Numeric identifier.
    pub account_id: u64,
}

/// A parent model holding nested models.
#[derive(Clone, Debug, Default, Model)]
pub struct Repository {
    /// Repository name.
    pub name: String,
    /// Single nested owner.
    #[model(with = modelmap::transform::model::<Owner>)]
    pub owner: Option<Owner>,
    /// Array of nested contributors.
    #[model(with = modelmap::transform::model_array::<Owner>)]
    pub contributors: Vec<Owner>,
}
