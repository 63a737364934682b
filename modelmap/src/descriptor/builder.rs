//! Declaring a model's fields and normalizing them into a table.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::field::TransformerSource;
use super::{FieldAccessor, FieldDescriptor, FieldDescriptorTable, StoragePolicy};
use crate::key_path::{KeyPath, KeyPathError};
use crate::model::Model;
use crate::transform::transformer_named;
use crate::validate::ValidationReport;

pub(crate) type ObjectHook<M> = dyn Fn(&M, &mut ValidationReport) + Send + Sync;
pub(crate) type PostBuildHook<M> = dyn Fn(&mut M) + Send + Sync;

/// Configuration mistakes found while building a descriptor table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    /// A declared key path is malformed.
    #[error("field '{field}' declares an invalid key path: {source}")]
    InvalidKeyPath {
        /// Offending field.
        field: String,
        /// Why the path was rejected.
        #[source]
        source: KeyPathError,
    },

    /// A field names a transformer nobody registered.
    #[error("field '{field}' names unknown transformer '{name}'")]
    UnknownTransformer {
        /// Offending field.
        field: String,
        /// The unresolved name.
        name: String,
    },

    /// A mapped field's transformer cannot encode values back to wire form.
    #[error("mapped field '{field}' uses transformer '{transformer}', which cannot reverse")]
    MissingReverse {
        /// Offending field.
        field: String,
        /// Label of the forward-only transformer.
        transformer: String,
    },

    /// A mapped field has no value access.
    #[error("field '{field}' is mapped but its value cannot be read or written")]
    UnmappableField {
        /// Offending field.
        field: String,
    },

    /// Two fields write to the same wire location.
    #[error("fields '{first}' and '{second}' both map to '{path}'")]
    DuplicateKeyPath {
        /// Field declared first.
        first: String,
        /// Field declared second.
        second: String,
        /// Key path of the second field.
        path: String,
    },
}

/// Collects a model's field declarations.
///
/// A model's `declare` receives an empty builder. The finished builder is
/// normalized into a [`FieldDescriptorTable`] by [`TableBuilder::try_build`].
pub struct TableBuilder<M> {
    fields: Vec<FieldDescriptor<M>>,
    object_validation: Option<Arc<ObjectHook<M>>>,
    post_build: Vec<Arc<PostBuildHook<M>>>,
}

impl<M> TableBuilder<M> {
    /// An empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            object_validation: None,
            post_build: Vec::new(),
        }
    }

    /// Declare a field.
    ///
    /// A field with the same name as an earlier one, inherited or not,
    /// replaces it in place.
    pub fn field(&mut self, descriptor: FieldDescriptor<M>) -> &mut Self {
        match self.fields.iter_mut().find(|existing| existing.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.fields.push(descriptor),
        }
        self
    }

    /// Declare a computed field with no storage. It never reaches the table.
    pub fn computed(&mut self, name: impl Into<String>) -> &mut Self
    where
        M: 'static,
    {
        self.field(FieldDescriptor::new(name, FieldAccessor::none()))
    }

    /// Install the whole-object validation hook, replacing any inherited one.
    pub fn validate_with<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&M, &mut ValidationReport) + Send + Sync + 'static,
    {
        self.object_validation = Some(Arc::new(hook));
        self
    }

    /// Add a normalization hook run after mapping and before validation.
    pub fn post_build<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&mut M) + Send + Sync + 'static,
    {
        self.post_build.push(Arc::new(hook));
        self
    }

    /// Number of declared fields, including computed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Normalize the declarations into a table.
    ///
    /// Computed fields are dropped. Every remaining field gets its key path
    /// parsed and its transformer resolved. The configuration is then
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] for the first misconfigured field.
    pub fn try_build(self) -> Result<FieldDescriptorTable<M>, TableError> {
        let mut fields = Vec::with_capacity(self.fields.len());
        for descriptor in self.fields {
            if descriptor.accessor.is_persistent() {
                fields.push(normalize(descriptor)?);
            }
        }
        check_overlaps(&fields)?;
        Ok(FieldDescriptorTable::new(
            fields,
            self.object_validation,
            self.post_build,
        ))
    }
}

impl<M: 'static> TableBuilder<M> {
    /// Inherit every declaration of the embedded model `P`.
    ///
    /// `P`'s fields are lifted through the projections and placed before
    /// anything declared afterwards. Redeclaring one of them later keeps
    /// its inherited position. `P`'s post-build hooks run before this
    /// model's own, and its validation hook applies until replaced.
    pub fn extend<P: Model>(
        &mut self,
        project: fn(&M) -> &P,
        project_mut: fn(&mut M) -> &mut P,
    ) -> &mut Self {
        let mut parent = TableBuilder::<P>::new();
        P::declare(&mut parent);
        for descriptor in &parent.fields {
            self.field(descriptor.lift(project, project_mut));
        }
        if let Some(hook) = parent.object_validation {
            self.object_validation = Some(Arc::new(move |model: &M, report: &mut ValidationReport| {
                hook(project(model), report);
            }));
        }
        for hook in parent.post_build {
            self.post_build
                .push(Arc::new(move |model: &mut M| hook(project_mut(model))));
        }
        self
    }
}

impl<M> Default for TableBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for TableBuilder<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBuilder")
            .field("fields", &self.fields)
            .field("object_validation", &self.object_validation.is_some())
            .field("post_build", &self.post_build.len())
            .finish()
    }
}

fn normalize<M>(mut descriptor: FieldDescriptor<M>) -> Result<FieldDescriptor<M>, TableError> {
    descriptor.key_path = resolve_key_path(&descriptor)?;
    descriptor.transformer = match &descriptor.source {
        TransformerSource::Identity => None,
        TransformerSource::Direct(transformer) => Some(transformer.clone()),
        TransformerSource::Named(name) => Some(transformer_named(name).ok_or_else(
            || TableError::UnknownTransformer {
                field: descriptor.name.clone(),
                name: name.clone(),
            },
        )?),
    };
    if descriptor.is_mapped() {
        if !descriptor.accessor.has_value_access() {
            return Err(TableError::UnmappableField {
                field: descriptor.name,
            });
        }
        if let Some(transformer) = &descriptor.transformer
            && !transformer.is_reversible()
        {
            return Err(TableError::MissingReverse {
                field: descriptor.name.clone(),
                transformer: transformer.label().to_owned(),
            });
        }
    }
    Ok(descriptor)
}

fn resolve_key_path<M>(descriptor: &FieldDescriptor<M>) -> Result<Option<KeyPath>, TableError> {
    if descriptor.unmapped {
        return Ok(None);
    }
    let raw = match &descriptor.declared_path {
        Some(path) => path.as_str(),
        None if descriptor.storage == StoragePolicy::Weak => return Ok(None),
        None => descriptor.name.as_str(),
    };
    KeyPath::parse(raw)
        .map(Some)
        .map_err(|source| TableError::InvalidKeyPath {
            field: descriptor.name.clone(),
            source,
        })
}

fn check_overlaps<M>(fields: &[FieldDescriptor<M>]) -> Result<(), TableError> {
    let mapped: Vec<(&str, &KeyPath)> = fields
        .iter()
        .filter_map(|field| field.key_path.as_ref().map(|path| (field.name(), path)))
        .collect();
    for (position, (second, path)) in mapped.iter().enumerate() {
        let clash = mapped
            .iter()
            .take(position)
            .find(|(_, earlier)| earlier.overlaps(path));
        if let Some((first, _)) = clash {
            return Err(TableError::DuplicateKeyPath {
                first: (*first).to_owned(),
                second: (*second).to_owned(),
                path: path.to_string(),
            });
        }
    }
    Ok(())
}
