//! Model to wire dictionary.

use serde_json::{Map, Value};
use tracing::trace;

use crate::descriptor::describe;
use crate::error::{FieldResultExt, MapResult, MappingError};
use crate::model::Model;
use crate::transform::Direction;

/// Encode `model` as a new wire dictionary.
///
/// Unmapped fields are omitted. Absent values are written as `null`.
/// Values go through each field's transformer in reverse.
///
/// # Errors
///
/// - [`MappingError::FieldRead`] when a field cannot be serialized.
/// - [`MappingError::FieldTransformFailed`] when a reverse transform fails.
/// - [`MappingError::KeyPath`] when a key path runs through a value an
///   earlier field wrote.
pub fn to_wire<M: Model>(model: &M) -> MapResult<Map<String, Value>> {
    let table = describe::<M>();
    let mut wire = Map::new();
    for field in table.mapped_fields() {
        let Some(path) = field.resolved_key_path() else {
            continue;
        };
        let value = field.read(model)?;
        let encoded = match field.resolved_transformer() {
            Some(transformer) => transformer
                .apply(Direction::Reverse, value)
                .for_field(field.name())?,
            None => value,
        };
        trace!(field = field.name(), path = %path, "encoded field");
        path.insert(&mut wire, encoded).for_field(field.name())?;
    }
    Ok(wire)
}

/// Encode each model as a wire object.
///
/// # Errors
///
/// The first failing model aborts the conversion. Its error is wrapped in
/// [`MappingError::Element`] with the model's index.
pub fn to_wire_array<M: Model>(models: &[M]) -> MapResult<Vec<Value>> {
    models
        .iter()
        .enumerate()
        .map(|(index, model)| {
            to_wire(model)
                .map(Value::Object)
                .map_err(|source| MappingError::Element {
                    index,
                    source: Box::new(source),
                })
        })
        .collect()
}
