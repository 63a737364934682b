//! Bidirectional value transformers.
//!
//! A [`Transformer`] converts a decoded wire value into the value a model
//! field stores (the forward direction) and, when reversible, back again.
//! Transformers are immutable and cheap to clone, so one instance can serve
//! every concurrent mapping operation.
//!
//! Failures are reported through [`TransformError`], which carries the
//! offending input. Asking a forward-only transformer to run in reverse is a
//! programming error rather than a data error and panics with the
//! [`ReverseUnsupported`] message; use [`Transformer::ensure_reversible`] or
//! [`Transformer::try_inverted`] to check up front.
//!
//! # Example
//!
//! ```rust
//! use modelmap::transform::{self, Direction};
//! use modelmap::ValueKind;
//! use serde_json::json;
//!
//! let strings = transform::array_mapping(transform::validating(ValueKind::String));
//! assert_eq!(strings.transform(json!(["a", "b"]))?, json!(["a", "b"]));
//!
//! let err = strings
//!     .apply(Direction::Forward, json!(["a", 2]))
//!     .expect_err("second element is not a string");
//! assert_eq!(err.index(), Some(1));
//! assert_eq!(err.invalid_input(), Some(&json!(2)));
//! # Ok::<_, modelmap::TransformError>(())
//! ```

mod builtin;
mod error;
mod model;
pub mod registry;
mod transformer;

pub use builtin::{array_mapping, boolean, validating, validating_with, value_mapping};
pub use error::{ReverseUnsupported, TransformError};
pub use model::{model, model_array};
pub use registry::{RegistryError, register_transformer, transformer_named};
pub use transformer::Transformer;

/// Which way a transformer runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Wire value to model value.
    Forward,
    /// Model value to wire value.
    Reverse,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}
