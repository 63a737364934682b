//! Transformers between nested wire objects and nested models.

use std::any::type_name;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{TransformError, Transformer, array_mapping};
use crate::model::Model;

/// Map a nested wire object to a model of type `M` and back.
///
/// Forward conversion runs the full mapper for `M`, including its post-build
/// hooks and validation, and hands the field the model's serialised form.
/// Reverse conversion rebuilds the model from that form and encodes it with
/// `M`'s own key paths. `null` passes through both ways.
#[must_use]
pub fn model<M>() -> Transformer
where
    M: Model + Serialize + DeserializeOwned,
{
    Transformer::new(decode_nested::<M>, encode_nested::<M>)
        .with_label(format!("model({})", type_name::<M>()))
}

/// Map an array of wire objects to an array of `M` models and back.
#[must_use]
pub fn model_array<M>() -> Transformer
where
    M: Model + Serialize + DeserializeOwned,
{
    array_mapping(model::<M>())
}

fn decode_nested<M>(wire: Value) -> Result<Value, TransformError>
where
    M: Model + Serialize,
{
    match wire {
        Value::Null => Ok(Value::Null),
        Value::Object(map) => {
            let nested = M::from_wire(&map).map_err(TransformError::nested)?;
            serde_json::to_value(&nested)
                .map_err(|err| TransformError::invalid(Value::Object(map), err.to_string()))
        }
        other => Err(TransformError::invalid(other, "expected an object")),
    }
}

fn encode_nested<M>(value: Value) -> Result<Value, TransformError>
where
    M: Model + DeserializeOwned,
{
    if value.is_null() {
        return Ok(Value::Null);
    }
    let nested = M::deserialize(&value)
        .map_err(|err| TransformError::invalid(value.clone(), err.to_string()))?;
    nested
        .to_wire()
        .map(Value::Object)
        .map_err(TransformError::nested)
}
