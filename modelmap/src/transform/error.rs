//! Transformer failure types.

use serde_json::Value;
use thiserror::Error;

use crate::error::MappingError;

/// A transformer rejected its input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The input value was not acceptable.
    #[error("invalid input {input}: {reason}")]
    InvalidInput {
        /// The rejected value.
        input: Value,
        /// Why the value was rejected.
        reason: String,
    },

    /// An element of a sequence failed to transform.
    #[error("element {index}: {source}")]
    Element {
        /// Position of the failing element.
        index: usize,
        /// The element's own failure.
        #[source]
        source: Box<TransformError>,
    },

    /// A nested model could not be mapped.
    #[error("nested model: {source}")]
    Nested {
        /// The nested mapping failure.
        #[source]
        source: Box<MappingError>,
    },
}

impl TransformError {
    /// Reject `input` with `reason`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modelmap::TransformError;
    /// use serde_json::json;
    ///
    /// let err = TransformError::invalid(json!(3), "expected a string");
    /// assert_eq!(err.invalid_input(), Some(&json!(3)));
    /// ```
    #[must_use]
    pub fn invalid(input: Value, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input,
            reason: reason.into(),
        }
    }

    /// Wrap a nested mapping failure.
    #[must_use]
    pub fn nested(source: MappingError) -> Self {
        Self::Nested {
            source: Box::new(source),
        }
    }

    /// The value that was ultimately rejected, following element failures
    /// down to the innermost one.
    #[must_use]
    pub fn invalid_input(&self) -> Option<&Value> {
        match self {
            Self::InvalidInput { input, .. } => Some(input),
            Self::Element { source, .. } => source.invalid_input(),
            Self::Nested { .. } => None,
        }
    }

    /// The index of the outermost failing element, if this failure came from
    /// a sequence.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Element { index, .. } => Some(*index),
            Self::InvalidInput { .. } | Self::Nested { .. } => None,
        }
    }
}

/// A forward-only transformer was asked to run in reverse or to invert.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("transformer '{transformer}' does not support reverse transformation")]
pub struct ReverseUnsupported {
    /// Label of the offending transformer.
    pub transformer: String,
}
