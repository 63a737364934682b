//! Primary error enum for mapping flows.

use thiserror::Error;

use crate::key_path::PathError;
use crate::transform::TransformError;
use crate::validate::ValidationReport;
use crate::value::ValueKind;

/// Result alias used throughout the mapper.
pub type MapResult<T> = Result<T, MappingError>;

/// Errors that abort a mapping operation.
///
/// Field-level failures carry the name of the field that failed. No
/// partially built model accompanies any of them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The field's key path could not be walked or written.
    #[error("key path for field '{field}': {source}")]
    KeyPath {
        /// Field whose key path failed.
        field: String,
        /// Underlying path failure.
        #[source]
        source: PathError,
    },

    /// The field's transformer rejected the value.
    #[error("transforming field '{field}' failed: {source}")]
    FieldTransformFailed {
        /// Field whose transformer failed.
        field: String,
        /// Underlying transformer failure.
        #[source]
        source: TransformError,
    },

    /// The transformed value does not fit the field's type.
    #[error("field '{field}' rejected its value: {source}")]
    FieldAssignment {
        /// Field that could not be assigned.
        field: String,
        /// Underlying deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// The field's value could not be read out of the model.
    #[error("field '{field}' could not be read: {source}")]
    FieldRead {
        /// Field that could not be read.
        field: String,
        /// Underlying serialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// A property-keyed map named a field the model does not have.
    #[error("model has no field named '{field}'")]
    UnknownField {
        /// The unrecognised name.
        field: String,
    },

    /// A value was supplied for a field that cannot take one, such as a
    /// weak reference or a field without value access.
    #[error("field '{field}' cannot be assigned a value")]
    NotSettable {
        /// The field that refused the value.
        field: String,
    },

    /// Wire data that should have been an object was something else.
    #[error("expected a wire object, found {found}")]
    NotAnObject {
        /// What was supplied instead.
        found: ValueKind,
    },

    /// An element of a wire array failed to map.
    #[error("element {index}: {source}")]
    Element {
        /// Position of the failing element.
        index: usize,
        /// The element's failure.
        #[source]
        source: Box<MappingError>,
    },

    /// The mapped model failed validation.
    #[error("model failed validation:\n{0}")]
    Validation(ValidationReport),
}

impl MappingError {
    /// The name of the field the failure is attributed to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::KeyPath { field, .. }
            | Self::FieldTransformFailed { field, .. }
            | Self::FieldAssignment { field, .. }
            | Self::FieldRead { field, .. }
            | Self::UnknownField { field }
            | Self::NotSettable { field } => Some(field),
            Self::Element { source, .. } => source.field(),
            Self::NotAnObject { .. } | Self::Validation(_) => None,
        }
    }

    /// The validation report, when the failure was a validation failure.
    #[must_use]
    pub const fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }
}
