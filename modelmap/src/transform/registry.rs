//! Process-wide registry of named transformers.
//!
//! Field declarations may refer to a transformer by name. Names are resolved
//! when a model's descriptor table is built, so an unknown name surfaces on
//! first use of the model rather than midway through a mapping.
//!
//! Each name can be registered once. Built-in transformers are available
//! under the names in [`names`] without registration.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::LazyLock;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use super::{Transformer, boolean, validating};
use crate::value::ValueKind;

/// Names of the built-in transformers.
pub mod names {
    /// Passes values through in both directions.
    pub const IDENTITY: &str = "modelmap.identity";
    /// Accepts booleans and `0`/`1`.
    pub const BOOLEAN: &str = "modelmap.boolean";
    /// Rejects anything but strings.
    pub const STRING: &str = "modelmap.string";
    /// Rejects anything but numbers.
    pub const NUMBER: &str = "modelmap.number";
    /// Rejects anything but arrays.
    pub const ARRAY: &str = "modelmap.array";
    /// Rejects anything but objects.
    pub const OBJECT: &str = "modelmap.object";
}

static REGISTRY: LazyLock<RwLock<HashMap<String, Transformer>>> =
    LazyLock::new(|| RwLock::new(builtins()));

fn builtins() -> HashMap<String, Transformer> {
    [
        (names::IDENTITY, Transformer::identity()),
        (names::BOOLEAN, boolean()),
        (names::STRING, validating(ValueKind::String)),
        (names::NUMBER, validating(ValueKind::Number)),
        (names::ARRAY, validating(ValueKind::Array)),
        (names::OBJECT, validating(ValueKind::Object)),
    ]
    .into_iter()
    .map(|(name, transformer)| (name.to_owned(), transformer))
    .collect()
}

/// Registration failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegistryError {
    /// The name already refers to a transformer.
    #[error("a transformer named '{name}' is already registered")]
    AlreadyRegistered {
        /// The contested name.
        name: String,
    },
}

/// Register `transformer` under `name`.
///
/// # Errors
///
/// Returns [`RegistryError::AlreadyRegistered`] when `name` is taken,
/// including by a built-in. Registered transformers are never replaced.
///
/// # Examples
///
/// ```rust
/// use modelmap::transform::{register_transformer, transformer_named, value_mapping};
///
/// register_transformer("docs.state", value_mapping([("open", 0), ("closed", 1)], -1, "unknown"))?;
/// assert!(transformer_named("docs.state").is_some());
/// assert!(register_transformer("docs.state", modelmap::Transformer::identity()).is_err());
/// # Ok::<_, modelmap::transform::RegistryError>(())
/// ```
pub fn register_transformer(
    name: impl Into<String>,
    transformer: Transformer,
) -> Result<(), RegistryError> {
    let mut registry = REGISTRY.write();
    match registry.entry(name.into()) {
        Entry::Occupied(taken) => Err(RegistryError::AlreadyRegistered {
            name: taken.key().clone(),
        }),
        Entry::Vacant(slot) => {
            debug!(name = %slot.key(), label = transformer.label(), "registered value transformer");
            slot.insert(transformer);
            Ok(())
        }
    }
}

/// Look up the transformer registered under `name`.
#[must_use]
pub fn transformer_named(name: &str) -> Option<Transformer> {
    REGISTRY.read().get(name).cloned()
}

/// All registered names, sorted.
#[must_use]
pub fn registered_names() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY.read().keys().cloned().collect();
    names.sort_unstable();
    names
}
