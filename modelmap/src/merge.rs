//! Merging one model into another, field by field.
//!
//! Each field follows its declared [`MergeStrategy`]. `Replace` copies the
//! other model's value; `Combine` hands both models to the field's
//! function. Read-only fields always keep the base value.
//!
//! ```
//! use modelmap::descriptor::{FieldAccessor, FieldDescriptor, MergeStrategy, TableBuilder};
//! use modelmap::{Model, merge};
//!
//! #[derive(Clone, Default)]
//! struct Tally {
//!     label: String,
//!     hits: u32,
//! }
//!
//! impl Model for Tally {
//!     fn declare(table: &mut TableBuilder<Self>) {
//!         table
//!             .field(FieldDescriptor::new(
//!                 "label",
//!                 FieldAccessor::<Self>::stored(|tally| &tally.label, |tally| &mut tally.label),
//!             ))
//!             .field(
//!                 FieldDescriptor::new(
//!                     "hits",
//!                     FieldAccessor::<Self>::stored(|tally| &tally.hits, |tally| &mut tally.hits),
//!                 )
//!                 .merge(MergeStrategy::combine(|base: &mut Self, other: &Self| {
//!                     merge::add(&mut base.hits, &other.hits);
//!                 })),
//!             );
//!     }
//! }
//!
//! let a = Tally { label: "a".into(), hits: 2 };
//! let b = Tally { label: "b".into(), hits: 3 };
//! let merged = merge::merge(&a, &b);
//! assert_eq!((merged.label.as_str(), merged.hits), ("b", 5));
//! ```

use std::time::Duration;

use tracing::trace;

use crate::descriptor::{FieldDescriptor, MergeStrategy, describe};
use crate::error::{MapResult, MappingError};
use crate::model::Model;

/// A copy of `base` with `other` merged into it.
#[must_use]
pub fn merge<M: Model>(base: &M, other: &M) -> M {
    let mut merged = base.clone();
    merge_into(&mut merged, other);
    merged
}

/// Merge every field of `other` into `base`, in declaration order.
pub fn merge_into<M: Model>(base: &mut M, other: &M) {
    let table = describe::<M>();
    for field in table.fields() {
        merge_one(field, base, other);
    }
}

/// Merge the field named `name` from `other` into `base`.
///
/// # Errors
///
/// Returns [`MappingError::UnknownField`] when `M` has no such field.
pub fn merge_field<M: Model>(base: &mut M, other: &M, name: &str) -> MapResult<()> {
    let table = describe::<M>();
    let field = table.field(name).ok_or_else(|| MappingError::UnknownField {
        field: name.to_owned(),
    })?;
    merge_one(field, base, other);
    Ok(())
}

/// Values that can be summed by an additive merge.
///
/// Integers and durations saturate at their bounds instead of overflowing,
/// so merging never panics. Floats follow IEEE addition.
pub trait Additive {
    /// Add `other` into `self`.
    fn accumulate(&mut self, other: &Self);
}

macro_rules! saturating_additive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Additive for $ty {
                fn accumulate(&mut self, other: &Self) {
                    *self = self.saturating_add(*other);
                }
            }
        )*
    };
}

saturating_additive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, Duration);

impl Additive for f32 {
    #[expect(clippy::float_arithmetic, reason = "float sums saturate to infinity")]
    fn accumulate(&mut self, other: &Self) {
        *self += *other;
    }
}

impl Additive for f64 {
    #[expect(clippy::float_arithmetic, reason = "float sums saturate to infinity")]
    fn accumulate(&mut self, other: &Self) {
        *self += *other;
    }
}

impl<T: Additive + Clone> Additive for Option<T> {
    /// `None` counts as nothing: the sum of `None` and a value is the value.
    fn accumulate(&mut self, other: &Self) {
        match (self.as_mut(), other) {
            (Some(base), Some(extra)) => base.accumulate(extra),
            (None, Some(extra)) => *self = Some(extra.clone()),
            (_, None) => {}
        }
    }
}

/// Combining function for additive fields: `base + other`, saturating.
///
/// ```
/// use modelmap::merge;
///
/// let mut total = u64::MAX - 1;
/// merge::add(&mut total, &5);
/// assert_eq!(total, u64::MAX);
/// ```
pub fn add<T: Additive>(base: &mut T, other: &T) {
    base.accumulate(other);
}

fn merge_one<M>(field: &FieldDescriptor<M>, base: &mut M, other: &M) {
    if !field.is_mutable() {
        trace!(field = field.name(), "read-only field keeps base value");
        return;
    }
    match field.merge_strategy() {
        MergeStrategy::Replace => field.replace(base, other),
        MergeStrategy::Combine(combine) => combine(base, other),
    }
}
