//! Dotted key paths into nested wire maps.
//!
//! A key path such as `"owner.login"` names a value nested inside decoded
//! objects. Resolution walks the path one segment at a time. Every
//! intermediate segment must land on an object; the leaf may be anything,
//! including the explicit `null` sentinel, or may be missing altogether.
//!
//! ```rust
//! use modelmap::key_path::resolve;
//! use serde_json::json;
//!
//! let wire = json!({"owner": {"login": "octocat"}});
//! let map = wire.as_object().expect("object literal");
//! assert_eq!(resolve(map, "owner.login")?, Some(&json!("octocat")));
//! assert_eq!(resolve(map, "owner.email")?, None);
//! # Ok::<_, modelmap::PathError>(())
//! ```

mod error;

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::value::ValueKind;

pub use error::{KeyPathError, PathError};

const SEPARATOR: char = '.';

/// Resolve the dotted `path` against `root` without parsing it first.
///
/// Segments are split on `.` verbatim, so `"a..b"` looks up the empty key
/// between the dots. Declared key paths go through [`KeyPath::parse`], which
/// rejects such paths up front.
///
/// # Errors
///
/// Returns [`PathError::NotATraversableContainer`] when an intermediate
/// segment resolves to anything other than an object, including `null`.
pub fn resolve<'v>(
    root: &'v Map<String, Value>,
    path: &str,
) -> Result<Option<&'v Value>, PathError> {
    walk(root, path.split(SEPARATOR))
}

fn walk<'v, 's>(
    root: &'v Map<String, Value>,
    segments: impl IntoIterator<Item = &'s str>,
) -> Result<Option<&'v Value>, PathError> {
    let mut current = root;
    let mut traversed: Vec<&str> = Vec::new();
    let mut segments = segments.into_iter().peekable();
    while let Some(segment) = segments.next() {
        let Some(found) = current.get(segment) else {
            return Ok(None);
        };
        if segments.peek().is_none() {
            return Ok(Some(found));
        }
        traversed.push(segment);
        current = match found {
            Value::Object(map) => map,
            other => {
                let next = segments.peek().copied().unwrap_or_default();
                return Err(PathError::NotATraversableContainer {
                    segment: next.to_owned(),
                    traversed: traversed.join("."),
                    found: ValueKind::of(other),
                });
            }
        };
    }
    Ok(None)
}

/// A parsed, non-empty dotted key path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse `path`, rejecting empty paths and empty segments.
    ///
    /// # Errors
    ///
    /// Returns [`KeyPathError`] when `path` is empty or contains an empty
    /// segment such as `"a..b"` or `".a"`.
    pub fn parse(path: &str) -> Result<Self, KeyPathError> {
        if path.is_empty() {
            return Err(KeyPathError::Empty);
        }
        let segments: Vec<String> = path.split(SEPARATOR).map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(KeyPathError::EmptySegment {
                path: path.to_owned(),
            });
        }
        Ok(Self {
            raw: path.to_owned(),
            segments,
        })
    }

    /// The path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Iterate over the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns `true` when the path has a single segment.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    /// Resolve this path against `root`.
    ///
    /// `Ok(None)` means some segment was missing. `Ok(Some(&Value::Null))`
    /// means the leaf was explicitly `null`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotATraversableContainer`] when an intermediate
    /// segment is not an object.
    pub fn resolve<'v>(
        &self,
        root: &'v Map<String, Value>,
    ) -> Result<Option<&'v Value>, PathError> {
        walk(root, self.segments())
    }

    /// Write `value` at this path inside `root`, creating intermediate objects.
    ///
    /// An existing leaf is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotATraversableContainer`] when an intermediate
    /// segment already holds a non-object value.
    pub fn insert(&self, root: &mut Map<String, Value>, value: Value) -> Result<(), PathError> {
        let Some((leaf, parents)) = self.segments.split_last() else {
            return Ok(());
        };
        let mut current = root;
        for (depth, segment) in parents.iter().enumerate() {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            current = match slot {
                Value::Object(map) => map,
                other => {
                    let next = self
                        .segments
                        .get(depth + 1)
                        .cloned()
                        .unwrap_or_default();
                    return Err(PathError::NotATraversableContainer {
                        segment: next,
                        traversed: self
                            .segments
                            .get(..=depth)
                            .map(|done| done.join("."))
                            .unwrap_or_default(),
                        found: ValueKind::of(other),
                    });
                }
            };
        }
        current.insert(leaf.clone(), value);
        Ok(())
    }

    /// Returns `true` when `self` and `other` would write to overlapping
    /// locations, i.e. one is a prefix of the other or they are equal.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.segments
            .iter()
            .zip(other.segments.iter())
            .all(|(a, b)| a == b)
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests;
