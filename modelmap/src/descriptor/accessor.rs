//! Type-erased access to a single field of a model.
//!
//! An accessor is resolved once, when the field is declared, into a small
//! table of closures. The mapper, merge engine and validator only ever see
//! the erased form, so they never need to know the field's Rust type.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

type Getter<M> = dyn Fn(&M) -> Result<Value, serde_json::Error> + Send + Sync;
type Setter<M> = dyn Fn(&mut M, Value) -> Result<(), serde_json::Error> + Send + Sync;
type Replacer<M> = dyn Fn(&mut M, &M) + Send + Sync;

/// How a field's value is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AccessorKind {
    /// Backed by storage, with value access and typed replacement.
    Stored,
    /// Backed by storage, with typed replacement only.
    Opaque,
    /// No storage, but a custom getter and setter.
    Custom,
    /// No storage and no accessor. Never part of a built table.
    Computed,
}

/// Erased getter, setter and replacement for one field of `M`.
pub struct FieldAccessor<M> {
    kind: AccessorKind,
    getter: Option<Arc<Getter<M>>>,
    setter: Option<Arc<Setter<M>>>,
    replacer: Option<Arc<Replacer<M>>>,
}

impl<M: 'static> FieldAccessor<M> {
    /// Access a stored field through a pair of projections.
    ///
    /// Assigning `null` stores the field's absent value: `None` when `T`
    /// deserializes from `null`, `T::default()` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use modelmap::descriptor::FieldAccessor;
    ///
    /// #[derive(Default)]
    /// struct Repo {
    ///     stars: u32,
    /// }
    ///
    /// let accessor = FieldAccessor::<Repo>::stored(|repo| &repo.stars, |repo| &mut repo.stars);
    /// assert!(accessor.has_value_access());
    /// ```
    #[must_use]
    pub fn stored<T>(get: fn(&M) -> &T, get_mut: fn(&mut M) -> &mut T) -> Self
    where
        T: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static,
    {
        Self {
            kind: AccessorKind::Stored,
            getter: Some(Arc::new(move |model: &M| serde_json::to_value(get(model)))),
            setter: Some(Arc::new(move |model: &mut M, value: Value| {
                *get_mut(model) = absent_or_value::<T>(value)?;
                Ok(())
            })),
            replacer: Some(Arc::new(move |base: &mut M, other: &M| {
                *get_mut(base) = get(other).clone();
            })),
        }
    }

    /// Access a stored field whose type has no wire representation.
    ///
    /// Weak references are declared this way. The field takes part in merge
    /// but can never be mapped or compared.
    #[must_use]
    pub fn opaque<T>(get: fn(&M) -> &T, get_mut: fn(&mut M) -> &mut T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self {
            kind: AccessorKind::Opaque,
            getter: None,
            setter: None,
            replacer: Some(Arc::new(move |base: &mut M, other: &M| {
                *get_mut(base) = get(other).clone();
            })),
        }
    }

    /// A field with no storage of its own, reached through custom code.
    ///
    /// Merging copies the value by calling `getter` on the other model and
    /// `setter` on the base. Merges cannot fail, so if either call errors
    /// the base keeps its value and the failure is logged at `warn`.
    #[must_use]
    pub fn custom<G, S>(getter: G, setter: S) -> Self
    where
        G: Fn(&M) -> Result<Value, serde_json::Error> + Send + Sync + 'static,
        S: Fn(&mut M, Value) -> Result<(), serde_json::Error> + Send + Sync + 'static,
    {
        let get: Arc<Getter<M>> = Arc::new(getter);
        let set: Arc<Setter<M>> = Arc::new(setter);
        let replacer = {
            let read = Arc::clone(&get);
            let write = Arc::clone(&set);
            move |base: &mut M, other: &M| {
                let outcome = read(other).and_then(|value| write(base, value));
                if let Err(err) = outcome {
                    warn!(error = %err, "custom accessor could not copy value during merge");
                }
            }
        };
        Self {
            kind: AccessorKind::Custom,
            getter: Some(get),
            setter: Some(set),
            replacer: Some(Arc::new(replacer)),
        }
    }

    /// A computed field. It is declared but never persisted.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: AccessorKind::Computed,
            getter: None,
            setter: None,
            replacer: None,
        }
    }

    /// Re-root an accessor of an embedded model `S` onto the embedding model.
    #[must_use]
    pub fn lift<S: 'static>(
        inner: FieldAccessor<S>,
        project: fn(&M) -> &S,
        project_mut: fn(&mut M) -> &mut S,
    ) -> Self {
        Self {
            kind: inner.kind,
            getter: inner.getter.map(|get| {
                let lifted: Arc<Getter<M>> = Arc::new(move |model: &M| get(project(model)));
                lifted
            }),
            setter: inner.setter.map(|set| {
                let lifted: Arc<Setter<M>> =
                    Arc::new(move |model: &mut M, value: Value| set(project_mut(model), value));
                lifted
            }),
            replacer: inner.replacer.map(|replace| {
                let lifted: Arc<Replacer<M>> = Arc::new(move |base: &mut M, other: &M| {
                    replace(project_mut(base), project(other));
                });
                lifted
            }),
        }
    }
}

impl<M> FieldAccessor<M> {
    /// How the field is reached.
    #[must_use]
    pub const fn kind(&self) -> AccessorKind {
        self.kind
    }

    /// Whether the field has storage of its own.
    #[must_use]
    pub const fn has_storage(&self) -> bool {
        matches!(self.kind, AccessorKind::Stored | AccessorKind::Opaque)
    }

    /// Whether the field belongs in a descriptor table.
    ///
    /// A field is persistent when it has storage or a custom accessor.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !matches!(self.kind, AccessorKind::Computed)
    }

    /// Whether the field's value can be read and written as a wire value.
    #[must_use]
    pub const fn has_value_access(&self) -> bool {
        self.getter.is_some() && self.setter.is_some()
    }

    pub(crate) fn read(&self, model: &M) -> Option<Result<Value, serde_json::Error>> {
        self.getter.as_ref().map(|get| get(model))
    }

    pub(crate) fn write(
        &self,
        model: &mut M,
        value: Value,
    ) -> Option<Result<(), serde_json::Error>> {
        self.setter.as_ref().map(|set| set(model, value))
    }

    pub(crate) fn replace(&self, base: &mut M, other: &M) {
        if let Some(replace) = &self.replacer {
            replace(base, other);
        }
    }
}

impl<M> Clone for FieldAccessor<M> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            replacer: self.replacer.clone(),
        }
    }
}

impl<M> fmt::Debug for FieldAccessor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("kind", &self.kind)
            .field("value_access", &self.has_value_access())
            .finish_non_exhaustive()
    }
}

fn absent_or_value<T>(value: Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return Ok(serde_json::from_value(Value::Null).unwrap_or_default());
    }
    serde_json::from_value(value)
}
