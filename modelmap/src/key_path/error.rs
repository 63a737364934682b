//! Errors raised while parsing or walking key paths.

use thiserror::Error;

use crate::value::ValueKind;

/// Failure to walk a key path through wire data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    /// An intermediate segment resolved to something other than an object.
    #[error("cannot look up '{segment}' below '{traversed}': found {found}, expected an object")]
    NotATraversableContainer {
        /// The segment that could not be looked up.
        segment: String,
        /// The portion of the path resolved before the failure.
        traversed: String,
        /// What was found in place of an object.
        found: ValueKind,
    },
}

impl PathError {
    /// The segment that could not be looked up.
    #[must_use]
    pub fn segment(&self) -> &str {
        match self {
            Self::NotATraversableContainer { segment, .. } => segment,
        }
    }
}

/// A declared key path is malformed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyPathError {
    /// The path was the empty string.
    #[error("key path must not be empty")]
    Empty,

    /// The path contained an empty segment.
    #[error("key path '{path}' contains an empty segment")]
    EmptySegment {
        /// The offending path.
        path: String,
    },
}
