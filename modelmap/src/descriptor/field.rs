//! The normalized description of one model field.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::FieldAccessor;
use crate::error::{MapResult, MappingError};
use crate::key_path::KeyPath;
use crate::transform::Transformer;

/// How a field holds its value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoragePolicy {
    /// Plain value, copied on assignment.
    Value,
    /// Owned value, cloned on assignment.
    #[default]
    Owned,
    /// Shared value, retained on assignment.
    Shared,
    /// Weak reference. Never mapped or compared.
    Weak,
}

/// Whether a field counts towards a model's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageBehavior {
    /// Compared by `equivalent` and included in dictionaries.
    Permanent,
    /// Skipped by `equivalent` and by dictionaries.
    Transitory,
}

impl StoragePolicy {
    /// The behaviour this policy implies.
    #[must_use]
    pub const fn behavior(self) -> StorageBehavior {
        match self {
            Self::Weak => StorageBehavior::Transitory,
            Self::Value | Self::Owned | Self::Shared => StorageBehavior::Permanent,
        }
    }
}

type Combine<M> = dyn Fn(&mut M, &M) + Send + Sync;
type Predicate<M> = dyn Fn(&M) -> bool + Send + Sync;

/// How a field combines two values during merge.
pub enum MergeStrategy<M> {
    /// Take the other model's value.
    Replace,
    /// Combine both values with a per-field function.
    Combine(Arc<Combine<M>>),
}

impl<M> MergeStrategy<M> {
    /// Declare a combining function. It receives the base model mutably and
    /// the other model by reference.
    #[must_use]
    pub fn combine<F>(combine: F) -> Self
    where
        F: Fn(&mut M, &M) + Send + Sync + 'static,
    {
        Self::Combine(Arc::new(combine))
    }

    pub(crate) fn lift<P: 'static>(
        &self,
        project: fn(&P) -> &M,
        project_mut: fn(&mut P) -> &mut M,
    ) -> MergeStrategy<P>
    where
        M: 'static,
    {
        match self {
            Self::Replace => MergeStrategy::Replace,
            Self::Combine(combine) => {
                let inner = Arc::clone(combine);
                MergeStrategy::combine(move |base: &mut P, other: &P| {
                    inner(project_mut(base), project(other));
                })
            }
        }
    }
}

impl<M> Default for MergeStrategy<M> {
    fn default() -> Self {
        Self::Replace
    }
}

impl<M> Clone for MergeStrategy<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Replace => Self::Replace,
            Self::Combine(combine) => Self::Combine(Arc::clone(combine)),
        }
    }
}

impl<M> fmt::Debug for MergeStrategy<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => f.write_str("Replace"),
            Self::Combine(_) => f.write_str("Combine(..)"),
        }
    }
}

/// A per-field check run by the validator.
pub struct FieldValidation<M> {
    predicate: Arc<Predicate<M>>,
    message: String,
}

impl<M> FieldValidation<M> {
    /// A check that fails with `message` whenever `predicate` returns false.
    #[must_use]
    pub fn new<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether `model` passes the check.
    #[must_use]
    pub fn passes(&self, model: &M) -> bool {
        (self.predicate)(model)
    }

    fn lift<P: 'static>(&self, project: fn(&P) -> &M) -> FieldValidation<P>
    where
        M: 'static,
    {
        let inner = Arc::clone(&self.predicate);
        FieldValidation::new(move |model: &P| inner(project(model)), self.message.clone())
    }
}

impl<M> Clone for FieldValidation<M> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            message: self.message.clone(),
        }
    }
}

impl<M> fmt::Debug for FieldValidation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidation")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Where a declared field's transformer comes from.
#[derive(Clone, Debug, Default)]
pub(crate) enum TransformerSource {
    #[default]
    Identity,
    Direct(Transformer),
    Named(String),
}

/// Everything the engine knows about one field of `M`.
///
/// Descriptors are declared fluently and normalized when the table is
/// built. After that they are immutable.
///
/// ```
/// use modelmap::descriptor::{FieldAccessor, FieldDescriptor, StoragePolicy};
///
/// #[derive(Default)]
/// struct Repo {
///     stars: u32,
/// }
///
/// let stars = FieldDescriptor::new(
///     "stars",
///     FieldAccessor::<Repo>::stored(|repo| &repo.stars, |repo| &mut repo.stars),
/// )
/// .storage(StoragePolicy::Value)
/// .key_path("stats.stargazers")
/// .read_only();
/// assert_eq!(stars.name(), "stars");
/// assert!(!stars.is_mutable());
/// ```
pub struct FieldDescriptor<M> {
    pub(crate) name: String,
    pub(crate) storage: StoragePolicy,
    pub(crate) mutable: bool,
    pub(crate) declared_path: Option<String>,
    pub(crate) unmapped: bool,
    pub(crate) key_path: Option<KeyPath>,
    pub(crate) source: TransformerSource,
    pub(crate) transformer: Option<Transformer>,
    pub(crate) merge: MergeStrategy<M>,
    pub(crate) validations: Vec<FieldValidation<M>>,
    pub(crate) accessor: FieldAccessor<M>,
}

impl<M> FieldDescriptor<M> {
    /// Declare a field named `name`.
    ///
    /// Unless told otherwise the field is owned, mutable, mapped under its
    /// own name, untransformed and replaced on merge.
    #[must_use]
    pub fn new(name: impl Into<String>, accessor: FieldAccessor<M>) -> Self {
        Self {
            name: name.into(),
            storage: StoragePolicy::default(),
            mutable: true,
            declared_path: None,
            unmapped: false,
            key_path: None,
            source: TransformerSource::Identity,
            transformer: None,
            merge: MergeStrategy::Replace,
            validations: Vec::new(),
            accessor,
        }
    }

    /// Set the storage policy.
    #[must_use]
    pub const fn storage(mut self, storage: StoragePolicy) -> Self {
        self.storage = storage;
        self
    }

    /// Keep the base value when merging.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.mutable = false;
        self
    }

    /// Map the field at a dotted wire path instead of its name.
    #[must_use]
    pub fn key_path(mut self, path: impl Into<String>) -> Self {
        self.declared_path = Some(path.into());
        self.unmapped = false;
        self
    }

    /// Leave the field out of wire mapping.
    #[must_use]
    pub fn unmapped(mut self) -> Self {
        self.unmapped = true;
        self.declared_path = None;
        self
    }

    /// Convert wire values with `transformer`.
    #[must_use]
    pub fn transformer(mut self, transformer: Transformer) -> Self {
        self.source = TransformerSource::Direct(transformer);
        self
    }

    /// Convert wire values with the transformer registered under `name`.
    ///
    /// The name is resolved when the table is built.
    #[must_use]
    pub fn transformer_named(mut self, name: impl Into<String>) -> Self {
        self.source = TransformerSource::Named(name.into());
        self
    }

    /// Set the merge strategy.
    #[must_use]
    pub fn merge(mut self, merge: MergeStrategy<M>) -> Self {
        self.merge = merge;
        self
    }

    /// Add a validation. Validations run in declaration order.
    #[must_use]
    pub fn validate(mut self, validation: FieldValidation<M>) -> Self {
        self.validations.push(validation);
        self
    }

    /// The field's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The storage policy.
    #[must_use]
    pub const fn storage_policy(&self) -> StoragePolicy {
        self.storage
    }

    /// The storage behaviour implied by the policy.
    #[must_use]
    pub const fn behavior(&self) -> StorageBehavior {
        self.storage.behavior()
    }

    /// Whether merge may overwrite the field.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        self.mutable
    }

    /// The resolved wire location. `None` for unmapped fields and for
    /// descriptors that have not been through a table build.
    #[must_use]
    pub const fn resolved_key_path(&self) -> Option<&KeyPath> {
        self.key_path.as_ref()
    }

    /// Whether the field takes part in wire mapping.
    #[must_use]
    pub const fn is_mapped(&self) -> bool {
        self.key_path.is_some()
    }

    /// The resolved transformer, if any. `None` means identity.
    #[must_use]
    pub const fn resolved_transformer(&self) -> Option<&Transformer> {
        self.transformer.as_ref()
    }

    /// The registry name the transformer was declared under, if any.
    #[must_use]
    pub fn transformer_name(&self) -> Option<&str> {
        match &self.source {
            TransformerSource::Named(name) => Some(name),
            TransformerSource::Identity | TransformerSource::Direct(_) => None,
        }
    }

    /// The merge strategy.
    #[must_use]
    pub const fn merge_strategy(&self) -> &MergeStrategy<M> {
        &self.merge
    }

    /// The field's validations, in order.
    #[must_use]
    pub fn validations(&self) -> &[FieldValidation<M>] {
        &self.validations
    }

    /// The erased accessor.
    #[must_use]
    pub const fn accessor(&self) -> &FieldAccessor<M> {
        &self.accessor
    }

    pub(crate) fn read(&self, model: &M) -> MapResult<Value> {
        match self.accessor.read(model) {
            Some(Ok(value)) => Ok(value),
            Some(Err(source)) => Err(MappingError::FieldRead {
                field: self.name.clone(),
                source,
            }),
            None => Ok(Value::Null),
        }
    }

    pub(crate) fn assign(&self, model: &mut M, value: Value) -> MapResult<()> {
        let Some(outcome) = self.accessor.write(model, value) else {
            return Err(MappingError::NotSettable {
                field: self.name.clone(),
            });
        };
        outcome.map_err(|source| MappingError::FieldAssignment {
            field: self.name.clone(),
            source,
        })
    }

    pub(crate) fn replace(&self, base: &mut M, other: &M) {
        self.accessor.replace(base, other);
    }
}

impl<M: 'static> FieldDescriptor<M> {
    pub(crate) fn lift<P: 'static>(
        &self,
        project: fn(&P) -> &M,
        project_mut: fn(&mut P) -> &mut M,
    ) -> FieldDescriptor<P> {
        FieldDescriptor {
            name: self.name.clone(),
            storage: self.storage,
            mutable: self.mutable,
            declared_path: self.declared_path.clone(),
            unmapped: self.unmapped,
            key_path: self.key_path.clone(),
            source: self.source.clone(),
            transformer: self.transformer.clone(),
            merge: self.merge.lift(project, project_mut),
            validations: self
                .validations
                .iter()
                .map(|validation| validation.lift(project))
                .collect(),
            accessor: FieldAccessor::lift(self.accessor.clone(), project, project_mut),
        }
    }
}

impl<M> Clone for FieldDescriptor<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            storage: self.storage,
            mutable: self.mutable,
            declared_path: self.declared_path.clone(),
            unmapped: self.unmapped,
            key_path: self.key_path.clone(),
            source: self.source.clone(),
            transformer: self.transformer.clone(),
            merge: self.merge.clone(),
            validations: self.validations.clone(),
            accessor: self.accessor.clone(),
        }
    }
}

impl<M> fmt::Debug for FieldDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("storage", &self.storage)
            .field("mutable", &self.mutable)
            .field("key_path", &self.key_path)
            .field("transformer", &self.transformer)
            .field("merge", &self.merge)
            .field("validations", &self.validations)
            .field("accessor", &self.accessor)
            .finish()
    }
}
