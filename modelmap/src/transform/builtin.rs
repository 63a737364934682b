//! Predefined transformer families.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use super::transformer::TransformFn;
use super::{TransformError, Transformer};
use crate::value::ValueKind;

/// Apply `inner` to every element of an array.
///
/// `null` passes through unchanged and anything else that is not an array is
/// rejected. The first failing element aborts the whole conversion and its
/// error is wrapped in [`TransformError::Element`] with that element's index.
/// The result is reversible exactly when `inner` is.
#[must_use]
pub fn array_mapping(inner: Transformer) -> Transformer {
    let label = Cow::Owned(format!("array({})", inner.label()));
    let forward_inner = inner.clone();
    let forward: Arc<TransformFn> =
        Arc::new(move |value: Value| map_elements(value, |item| forward_inner.transform(item)));
    let reverse = inner.is_reversible().then(|| {
        let reversed: Arc<TransformFn> = Arc::new(move |value: Value| {
            map_elements(value, |item| inner.reverse_transform(item))
        });
        reversed
    });
    Transformer::from_parts(label, forward, reverse)
}

fn map_elements<F>(value: Value, convert: F) -> Result<Value, TransformError>
where
    F: Fn(Value) -> Result<Value, TransformError>,
{
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                convert(item).map_err(|source| TransformError::Element {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(TransformError::invalid(other, "expected an array")),
    }
}

/// Translate between a fixed set of wire keys and model values.
///
/// Forward lookups map a wire key to its model value and fall back to
/// `default` when nothing matches. Reverse lookups map a model value back to
/// the first wire key declared for it and fall back to `reverse_default`.
/// Neither direction fails. Matching uses value equality.
///
/// # Examples
///
/// ```rust
/// use modelmap::transform::value_mapping;
/// use serde_json::json;
///
/// let kinds = value_mapping([("foo", 1), ("bar", 2)], 0, "undefined");
/// assert_eq!(kinds.transform(json!("foo"))?, json!(1));
/// assert_eq!(kinds.transform(json!("baz"))?, json!(0));
/// assert_eq!(kinds.reverse_transform(json!(2))?, json!("bar"));
/// assert_eq!(kinds.reverse_transform(json!(3))?, json!("undefined"));
/// # Ok::<_, modelmap::TransformError>(())
/// ```
#[must_use]
pub fn value_mapping<I, K, V>(
    entries: I,
    default: impl Into<Value>,
    reverse_default: impl Into<Value>,
) -> Transformer
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Value>,
    V: Into<Value>,
{
    let table: Arc<[(Value, Value)]> = entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect();
    let fallback: Value = default.into();
    let reverse_fallback: Value = reverse_default.into();
    let forward_table = Arc::clone(&table);
    Transformer::new(
        move |input| {
            Ok(forward_table
                .iter()
                .find(|(key, _)| *key == input)
                .map_or_else(|| fallback.clone(), |(_, value)| value.clone()))
        },
        move |input| {
            Ok(table
                .iter()
                .find(|(_, value)| *value == input)
                .map_or_else(|| reverse_fallback.clone(), |(key, _)| key.clone()))
        },
    )
    .with_label("value-mapping")
}

/// Pass values of `kind` through unchanged and reject everything else.
///
/// `null` is always accepted. The reverse direction is the identity.
#[must_use]
pub fn validating(kind: ValueKind) -> Transformer {
    validating_with(kind.to_string(), move |value| kind.matches(value))
}

/// Pass values accepted by `predicate` through unchanged and reject the rest
/// as not being `expected`.
///
/// `null` is always accepted. The reverse direction is the identity.
#[must_use]
pub fn validating_with<P>(expected: impl Into<String>, predicate: P) -> Transformer
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let wanted: String = expected.into();
    let label = Cow::Owned(format!("validating({wanted})"));
    Transformer::new(
        move |value: Value| {
            if value.is_null() || predicate(&value) {
                Ok(value)
            } else {
                let reason = format!("expected {wanted}, found {}", ValueKind::of(&value));
                Err(TransformError::invalid(value, reason))
            }
        },
        Ok,
    )
    .with_label(label)
}

/// Accept booleans and the numbers `0` and `1`, producing booleans.
///
/// Reverse conversion accepts booleans only. `null` passes through both ways.
#[must_use]
pub fn boolean() -> Transformer {
    Transformer::new(
        |value: Value| match value {
            Value::Null | Value::Bool(_) => Ok(value),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(Value::Bool(false)),
                Some(1) => Ok(Value::Bool(true)),
                _ => Err(TransformError::invalid(Value::Number(n), "expected 0 or 1")),
            },
            other => Err(TransformError::invalid(other, "expected a boolean")),
        },
        |value: Value| match value {
            Value::Null | Value::Bool(_) => Ok(value),
            other => Err(TransformError::invalid(other, "expected a boolean")),
        },
    )
    .with_label("boolean")
}
