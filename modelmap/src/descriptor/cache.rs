//! Process-wide cache of built descriptor tables.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{FieldDescriptorTable, TableBuilder, TableError};
use crate::model::Model;

type ErasedTable = Arc<dyn Any + Send + Sync>;

static TABLES: LazyLock<RwLock<HashMap<TypeId, ErasedTable>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// The descriptor table of `M`, building and caching it on first use.
///
/// # Panics
///
/// Panics when `M`'s declarations are misconfigured. Use [`try_describe`]
/// to receive the [`TableError`] instead.
#[track_caller]
#[must_use]
pub fn describe<M: Model>() -> Arc<FieldDescriptorTable<M>> {
    match try_describe::<M>() {
        Ok(table) => table,
        Err(err) => panic!("invalid model declaration for {}: {err}", type_name::<M>()),
    }
}

/// The descriptor table of `M`, or the configuration error that prevents
/// building it.
///
/// Tables are built outside the lock. Two threads racing on the same type
/// both build, and the later insert wins. Failed builds are not cached.
///
/// # Errors
///
/// Returns the [`TableError`] found while normalizing `M`'s declarations.
pub fn try_describe<M: Model>() -> Result<Arc<FieldDescriptorTable<M>>, TableError> {
    if let Some(table) = cached::<M>() {
        return Ok(table);
    }

    let mut builder = TableBuilder::<M>::new();
    M::declare(&mut builder);
    let table = Arc::new(builder.try_build()?);
    debug!(
        model = type_name::<M>(),
        fields = table.len(),
        "built descriptor table"
    );

    let erased: ErasedTable = Arc::clone(&table) as ErasedTable;
    if TABLES.write().insert(TypeId::of::<M>(), erased).is_some() {
        warn!(
            model = type_name::<M>(),
            "replaced a descriptor table built concurrently"
        );
    }
    Ok(table)
}

fn cached<M: Model>() -> Option<Arc<FieldDescriptorTable<M>>> {
    let erased = TABLES.read().get(&TypeId::of::<M>()).cloned()?;
    erased.downcast::<FieldDescriptorTable<M>>().ok()
}
