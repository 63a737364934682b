//! Classification of decoded wire values.

use std::fmt;

use serde_json::Value;

/// The shape of a decoded wire value.
///
/// Used by class-checking transformers and in error messages that report what
/// was found where something else was expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The explicit-null sentinel.
    Null,
    /// `true` or `false`.
    Bool,
    /// Any JSON number.
    Number,
    /// A string.
    String,
    /// A sequence of values.
    Array,
    /// A string-keyed map.
    Object,
}

impl ValueKind {
    /// Classify `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use modelmap::ValueKind;
    /// use serde_json::json;
    ///
    /// assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
    /// assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
    /// ```
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Returns `true` when `value` has this shape.
    #[must_use]
    pub const fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Null, Value::Null)
                | (Self::Bool, Value::Bool(_))
                | (Self::Number, Value::Number(_))
                | (Self::String, Value::String(_))
                | (Self::Array, Value::Array(_))
                | (Self::Object, Value::Object(_))
        )
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
