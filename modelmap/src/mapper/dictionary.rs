//! Property-keyed dictionaries and value equality.

use serde_json::{Map, Value};

use super::decode::finish;
use crate::descriptor::{StorageBehavior, describe};
use crate::error::{MapResult, MappingError};
use crate::model::Model;

/// The model's permanent fields keyed by field name.
///
/// Key paths and transformers play no part. Absent values appear as `null`.
/// Fields without value access are left out.
///
/// # Errors
///
/// Returns [`MappingError::FieldRead`] when a field cannot be serialized.
pub fn dictionary_value<M: Model>(model: &M) -> MapResult<Map<String, Value>> {
    let table = describe::<M>();
    let mut dictionary = Map::new();
    for field in table.permanent_fields() {
        if field.accessor().has_value_access() {
            dictionary.insert(field.name().to_owned(), field.read(model)?);
        }
    }
    Ok(dictionary)
}

/// Build an `M` from a dictionary keyed by field name.
///
/// A `null` entry sets the field's absent value. Post-build hooks and
/// validation run as for [`from_wire`](super::from_wire).
///
/// # Errors
///
/// - [`MappingError::UnknownField`] when a key names no field.
/// - [`MappingError::NotSettable`] when a key names a field that
///   [`dictionary_value`] would leave out, such as a weak reference.
/// - [`MappingError::FieldAssignment`] when a value does not fit its field.
/// - [`MappingError::Validation`] when the finished model is invalid.
pub fn from_dictionary<M: Model>(dictionary: &Map<String, Value>) -> MapResult<M> {
    let table = describe::<M>();
    let mut model = M::default();
    for (key, value) in dictionary {
        let field = table
            .field(key)
            .ok_or_else(|| MappingError::UnknownField { field: key.clone() })?;
        if field.behavior() != StorageBehavior::Permanent {
            return Err(MappingError::NotSettable { field: key.clone() });
        }
        field.assign(&mut model, value.clone())?;
    }
    finish(&table, model)
}

/// Whether `a` and `b` hold equal values in every permanent field.
///
/// Transitory fields, such as weak references, never take part. A field
/// that fails to serialize makes the models unequal.
#[must_use]
pub fn equivalent<M: Model>(a: &M, b: &M) -> bool {
    describe::<M>()
        .fields()
        .iter()
        .filter(|field| {
            field.behavior() == StorageBehavior::Permanent && field.accessor().has_value_access()
        })
        .all(|field| match (field.read(a), field.read(b)) {
            (Ok(left), Ok(right)) => left == right,
            _ => false,
        })
}
