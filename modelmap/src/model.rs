//! The `Model` trait tying a type to its descriptor table.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::descriptor::{FieldDescriptorTable, TableBuilder, describe};
use crate::error::MapResult;
use crate::validate::ValidationReport;
use crate::{mapper, merge, validate};

/// A strongly typed model that maps to and from wire dictionaries.
///
/// Implementors only declare their fields. Everything else is provided and
/// driven by the declaration table, which is built once per type.
///
/// `#[derive(Model)]` writes [`Model::declare`] from `#[model(...)]`
/// attributes.
pub trait Model: Default + Clone + Send + Sync + 'static {
    /// Declare the model's fields, hooks and supertypes.
    fn declare(table: &mut TableBuilder<Self>);

    /// The cached descriptor table.
    ///
    /// # Panics
    ///
    /// Panics when the declarations are misconfigured.
    #[track_caller]
    #[must_use]
    fn descriptors() -> Arc<FieldDescriptorTable<Self>> {
        describe::<Self>()
    }

    /// Build a model from a wire dictionary.
    ///
    /// # Errors
    ///
    /// See [`mapper::from_wire`].
    fn from_wire(wire: &Map<String, Value>) -> MapResult<Self> {
        mapper::from_wire(wire)
    }

    /// Build a model from a wire value that should be an object.
    ///
    /// # Errors
    ///
    /// See [`mapper::from_wire_value`].
    fn from_wire_value(wire: &Value) -> MapResult<Self> {
        mapper::from_wire_value(wire)
    }

    /// Encode the model as a wire dictionary.
    ///
    /// # Errors
    ///
    /// See [`mapper::to_wire`].
    fn to_wire(&self) -> MapResult<Map<String, Value>> {
        mapper::to_wire(self)
    }

    /// A model whose fields all keep their defaults, normalized and
    /// validated.
    ///
    /// # Errors
    ///
    /// See [`mapper::with_defaults`].
    fn with_defaults() -> MapResult<Self> {
        mapper::with_defaults()
    }

    /// Build a model from a property-keyed dictionary.
    ///
    /// # Errors
    ///
    /// See [`mapper::from_dictionary`].
    fn from_dictionary(dictionary: &Map<String, Value>) -> MapResult<Self> {
        mapper::from_dictionary(dictionary)
    }

    /// The model as a property-keyed dictionary.
    ///
    /// # Errors
    ///
    /// See [`mapper::dictionary_value`].
    fn dictionary_value(&self) -> MapResult<Map<String, Value>> {
        mapper::dictionary_value(self)
    }

    /// A copy of `self` with `other` merged into it.
    #[must_use]
    fn merged_with(&self, other: &Self) -> Self {
        merge::merge(self, other)
    }

    /// Merge `other` into `self`.
    fn merge_from(&mut self, other: &Self) {
        merge::merge_into(self, other);
    }

    /// Merge a single field of `other` into `self`.
    ///
    /// # Errors
    ///
    /// See [`merge::merge_field`].
    fn merge_field_from(&mut self, other: &Self, name: &str) -> MapResult<()> {
        merge::merge_field(self, other, name)
    }

    /// Every validation failure of `self`.
    #[must_use]
    fn validate(&self) -> ValidationReport {
        validate::validate(self)
    }

    /// Whether `self` and `other` hold equal values in every permanent
    /// field.
    #[must_use]
    fn equivalent(&self, other: &Self) -> bool {
        mapper::equivalent(self, other)
    }
}
