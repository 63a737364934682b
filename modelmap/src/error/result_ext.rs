//! Extensions for attributing field-local failures to their field.
//!
//! These helpers replace repetitive
//! `.map_err(|source| MappingError::…{ field: name.to_owned(), source })`
//! closures when a per-field step fails inside the mapper.
//!
//! # Examples
//!
//! ```
//! use modelmap::{FieldResultExt, MapResult, key_path};
//! use serde_json::{Map, Value, json};
//!
//! fn lookup<'a>(wire: &'a Map<String, Value>) -> MapResult<Option<&'a Value>> {
//!     key_path::resolve(wire, "owner.login").for_field("login")
//! }
//!
//! let wire = json!({"owner": 5});
//! let err = lookup(wire.as_object().expect("object")).expect_err("owner is a number");
//! assert_eq!(err.field(), Some("login"));
//! ```

use crate::key_path::PathError;
use crate::transform::TransformError;

use super::MappingError;

/// Converts a field-local failure into a [`MappingError`] naming the field.
pub trait IntoFieldError {
    /// Attribute `self` to `field`.
    fn into_field_error(self, field: &str) -> MappingError;
}

impl IntoFieldError for PathError {
    fn into_field_error(self, field: &str) -> MappingError {
        MappingError::KeyPath {
            field: field.to_owned(),
            source: self,
        }
    }
}

impl IntoFieldError for TransformError {
    fn into_field_error(self, field: &str) -> MappingError {
        MappingError::FieldTransformFailed {
            field: field.to_owned(),
            source: self,
        }
    }
}

/// Extension for `Result`s whose error can be attributed to a field.
pub trait FieldResultExt<T> {
    /// Map the error into a [`MappingError`] naming `field`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after attributing it to `field`.
    fn for_field(self, field: &str) -> Result<T, MappingError>;
}

impl<T, E> FieldResultExt<T> for Result<T, E>
where
    E: IntoFieldError,
{
    fn for_field(self, field: &str) -> Result<T, MappingError> {
        self.map_err(|err| err.into_field_error(field))
    }
}
