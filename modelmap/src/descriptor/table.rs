//! The immutable, normalized field table of one model type.

use std::fmt;
use std::sync::Arc;

use super::builder::{ObjectHook, PostBuildHook};
use super::{FieldDescriptor, StorageBehavior};
use crate::key_path::KeyPath;
use crate::validate::ValidationReport;

/// Every persistent field of `M`, in declaration order, with inherited
/// fields first.
pub struct FieldDescriptorTable<M> {
    fields: Vec<FieldDescriptor<M>>,
    object_validation: Option<Arc<ObjectHook<M>>>,
    post_build: Vec<Arc<PostBuildHook<M>>>,
}

impl<M> FieldDescriptorTable<M> {
    pub(crate) const fn new(
        fields: Vec<FieldDescriptor<M>>,
        object_validation: Option<Arc<ObjectHook<M>>>,
        post_build: Vec<Arc<PostBuildHook<M>>>,
    ) -> Self {
        Self {
            fields,
            object_validation,
            post_build,
        }
    }

    /// All fields, in order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<M>] {
        &self.fields
    }

    /// The field named `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<M>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Fields that take part in wire mapping, in order.
    pub fn mapped_fields(&self) -> impl Iterator<Item = &FieldDescriptor<M>> {
        self.fields.iter().filter(|field| field.is_mapped())
    }

    /// Fields whose storage behaviour is permanent, in order.
    pub fn permanent_fields(&self) -> impl Iterator<Item = &FieldDescriptor<M>> {
        self.fields
            .iter()
            .filter(|field| field.behavior() == StorageBehavior::Permanent)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the model has no persistent fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names, in order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// `(field name, key path)` for every mapped field, in order.
    #[must_use]
    pub fn key_paths(&self) -> Vec<(&str, &KeyPath)> {
        self.fields
            .iter()
            .filter_map(|field| field.resolved_key_path().map(|path| (field.name(), path)))
            .collect()
    }

    /// Whether the model declares a whole-object validation hook.
    #[must_use]
    pub const fn has_object_validation(&self) -> bool {
        self.object_validation.is_some()
    }

    pub(crate) fn run_post_build(&self, model: &mut M) {
        for hook in &self.post_build {
            hook(model);
        }
    }

    pub(crate) fn run_object_validation(&self, model: &M, report: &mut ValidationReport) {
        if let Some(hook) = &self.object_validation {
            hook(model, report);
        }
    }
}

impl<M> fmt::Debug for FieldDescriptorTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptorTable")
            .field("fields", &self.fields)
            .field("object_validation", &self.object_validation.is_some())
            .field("post_build", &self.post_build.len())
            .finish()
    }
}
