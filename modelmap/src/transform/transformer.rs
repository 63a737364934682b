//! The block-backed transformer type.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{Direction, ReverseUnsupported, TransformError};

pub(crate) type TransformFn = dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync;

/// An optionally reversible conversion between wire and model values.
///
/// Cloning shares the underlying closures.
#[derive(Clone)]
pub struct Transformer {
    label: Cow<'static, str>,
    forward: Arc<TransformFn>,
    reverse: Option<Arc<TransformFn>>,
}

impl Transformer {
    /// A transformer that only runs forward.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modelmap::Transformer;
    /// use serde_json::{Value, json};
    ///
    /// let upper = Transformer::forward_only(|value: Value| {
    ///     Ok(value.as_str().map_or(Value::Null, |s| json!(s.to_uppercase())))
    /// });
    /// assert_eq!(upper.transform(json!("hi"))?, json!("HI"));
    /// assert!(!upper.is_reversible());
    /// # Ok::<_, modelmap::TransformError>(())
    /// ```
    pub fn forward_only<F>(forward: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self::from_parts(Cow::Borrowed("forward-only"), Arc::new(forward), None)
    }

    /// A transformer that uses the same closure in both directions.
    pub fn reversible<F>(transformation: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        let shared: Arc<TransformFn> = Arc::new(transformation);
        Self::from_parts(
            Cow::Borrowed("reversible"),
            Arc::clone(&shared),
            Some(shared),
        )
    }

    /// A transformer with distinct forward and reverse closures.
    pub fn new<F, R>(forward: F, reverse: R) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
        R: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self::from_parts(
            Cow::Borrowed("custom"),
            Arc::new(forward),
            Some(Arc::new(reverse)),
        )
    }

    /// A reversible transformer that passes values through untouched.
    #[must_use]
    pub fn identity() -> Self {
        Self::reversible(Ok).with_label("identity")
    }

    pub(crate) fn from_parts(
        label: Cow<'static, str>,
        forward: Arc<TransformFn>,
        reverse: Option<Arc<TransformFn>>,
    ) -> Self {
        Self {
            label,
            forward,
            reverse,
        }
    }

    /// Attach a human-readable label used in diagnostics.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// The diagnostic label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` when the transformer can run in reverse.
    #[must_use]
    pub const fn is_reversible(&self) -> bool {
        self.reverse.is_some()
    }

    /// Check that the transformer can run in reverse.
    ///
    /// # Errors
    ///
    /// Returns [`ReverseUnsupported`] for forward-only transformers.
    pub fn ensure_reversible(&self) -> Result<(), ReverseUnsupported> {
        if self.is_reversible() {
            Ok(())
        } else {
            Err(self.unsupported())
        }
    }

    /// Run the forward conversion.
    ///
    /// # Errors
    ///
    /// Propagates the [`TransformError`] reported by the conversion.
    pub fn transform(&self, value: Value) -> Result<Value, TransformError> {
        (self.forward)(value)
    }

    /// Run the reverse conversion.
    ///
    /// # Errors
    ///
    /// Propagates the [`TransformError`] reported by the conversion.
    ///
    /// # Panics
    ///
    /// Panics when the transformer is forward-only. Check with
    /// [`Self::is_reversible`] first if the transformer's origin is unknown.
    #[track_caller]
    pub fn reverse_transform(&self, value: Value) -> Result<Value, TransformError> {
        match &self.reverse {
            Some(reverse) => reverse(value),
            None => panic!("{}", self.unsupported()),
        }
    }

    /// Run the conversion in `direction`.
    ///
    /// # Errors
    ///
    /// Propagates the [`TransformError`] reported by the conversion.
    ///
    /// # Panics
    ///
    /// Panics when `direction` is [`Direction::Reverse`] and the transformer
    /// is forward-only.
    #[track_caller]
    pub fn apply(&self, direction: Direction, value: Value) -> Result<Value, TransformError> {
        match direction {
            Direction::Forward => self.transform(value),
            Direction::Reverse => self.reverse_transform(value),
        }
    }

    /// Swap the forward and reverse conversions.
    ///
    /// # Panics
    ///
    /// Panics when the transformer is forward-only. Use
    /// [`Self::try_inverted`] to avoid panicking.
    #[must_use]
    #[track_caller]
    pub fn inverted(&self) -> Self {
        self.try_inverted()
            .unwrap_or_else(|unsupported| panic!("{unsupported}"))
    }

    /// Swap the forward and reverse conversions, if the transformer is
    /// reversible.
    ///
    /// # Errors
    ///
    /// Returns [`ReverseUnsupported`] for forward-only transformers.
    pub fn try_inverted(&self) -> Result<Self, ReverseUnsupported> {
        let Some(reverse) = &self.reverse else {
            return Err(self.unsupported());
        };
        Ok(Self::from_parts(
            Cow::Owned(format!("inverted({})", self.label)),
            Arc::clone(reverse),
            Some(Arc::clone(&self.forward)),
        ))
    }

    fn unsupported(&self) -> ReverseUnsupported {
        ReverseUnsupported {
            transformer: self.label.to_string(),
        }
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("label", &self.label)
            .field("reversible", &self.is_reversible())
            .finish_non_exhaustive()
    }
}
