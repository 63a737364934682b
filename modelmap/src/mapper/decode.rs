//! Wire dictionary to model.

use std::any::type_name;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::descriptor::{FieldDescriptorTable, describe};
use crate::error::{FieldResultExt, MapResult, MappingError};
use crate::model::Model;
use crate::validate::check;
use crate::value::ValueKind;

/// Build an `M` from a wire dictionary.
///
/// For each mapped field, in order:
///
/// - a missing key path leaves the default untouched;
/// - a present value, including an explicit `null`, goes through the
///   field's transformer and is assigned.
///
/// Post-build hooks then run, followed by validation.
///
/// # Errors
///
/// - [`MappingError::KeyPath`] when an intermediate path segment is not an
///   object.
/// - [`MappingError::FieldTransformFailed`] when a transformer rejects a
///   value.
/// - [`MappingError::FieldAssignment`] when a value does not fit the field.
/// - [`MappingError::Validation`] when the finished model is invalid.
pub fn from_wire<M: Model>(wire: &Map<String, Value>) -> MapResult<M> {
    let table = describe::<M>();
    let mut model = M::default();
    for field in table.mapped_fields() {
        let Some(path) = field.resolved_key_path() else {
            continue;
        };
        let Some(raw) = path.resolve(wire).for_field(field.name())? else {
            trace!(field = field.name(), path = %path, "absent on wire, keeping default");
            continue;
        };
        let value = match field.resolved_transformer() {
            Some(transformer) => transformer.transform(raw.clone()).for_field(field.name())?,
            None => raw.clone(),
        };
        trace!(field = field.name(), path = %path, "mapped field");
        field.assign(&mut model, value)?;
    }
    finish(&table, model)
}

/// Build an `M` from a wire value that must be an object.
///
/// # Errors
///
/// Returns [`MappingError::NotAnObject`] for anything but an object, and
/// otherwise whatever [`from_wire`] returns.
pub fn from_wire_value<M: Model>(wire: &Value) -> MapResult<M> {
    match wire {
        Value::Object(map) => from_wire(map),
        other => Err(MappingError::NotAnObject {
            found: ValueKind::of(other),
        }),
    }
}

/// Build one `M` per element of a wire array.
///
/// # Errors
///
/// The first failing element aborts the conversion. Its error is wrapped in
/// [`MappingError::Element`] with the element's index.
pub fn from_wire_array<M: Model>(wire: &[Value]) -> MapResult<Vec<M>> {
    wire.iter()
        .enumerate()
        .map(|(index, element)| {
            from_wire_value(element).map_err(|source| MappingError::Element {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// An `M` whose fields all keep their defaults.
///
/// Post-build hooks and validation still run.
///
/// # Errors
///
/// Returns [`MappingError::Validation`] when the default model is invalid.
pub fn with_defaults<M: Model>() -> MapResult<M> {
    finish(&describe::<M>(), M::default())
}

pub(super) fn finish<M: Model>(table: &FieldDescriptorTable<M>, mut model: M) -> MapResult<M> {
    table.run_post_build(&mut model);
    let report = check(table, &model);
    if report.is_valid() {
        return Ok(model);
    }
    debug!(
        model = type_name::<M>(),
        failures = report.len(),
        "mapped model failed validation"
    );
    Err(MappingError::Validation(report))
}
