//! Aggregation container for validation failures.

use std::fmt;

use thiserror::Error;

/// A single validation failure.
///
/// Field-level failures name their field. Failures raised by a model's
/// whole-object hook carry no field.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{}{message}", field_prefix(.field))]
pub struct ValidationError {
    /// Field the failure is attributed to, if any.
    pub field: Option<String>,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationError {
    /// A failure attributed to `field`.
    #[must_use]
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// A failure of the model as a whole.
    #[must_use]
    pub fn for_object(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

fn field_prefix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map_or_else(String::new, |name| format!("'{name}': "))
}

/// Every validation failure found on one model instance.
///
/// An empty report means the model is valid.
///
/// # Examples
///
/// ```
/// use modelmap::validate::ValidationReport;
///
/// let mut report = ValidationReport::default();
/// assert!(report.is_valid());
///
/// report.push_field("name", "must not be empty");
/// report.push_object("start must precede end");
/// assert_eq!(report.len(), 2);
/// assert_eq!(
///     report.to_string(),
///     "1: 'name': must not be empty\n2: start must precede end"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport(Vec<ValidationError>);

impl ValidationReport {
    /// Create a report from already collected failures.
    #[must_use]
    pub const fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Whether no failures were recorded.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded failures.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Same as [`ValidationReport::is_valid`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the recorded failures in the order they were found.
    #[must_use = "iterators should be consumed to inspect failures"]
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Failures attributed to `field`.
    #[must_use = "iterators should be consumed to inspect failures"]
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0
            .iter()
            .filter(move |error| error.field.as_deref() == Some(field))
    }

    /// Record a failure attributed to `field`.
    pub fn push_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationError::for_field(field, message));
    }

    /// Record a failure of the model as a whole.
    pub fn push_object(&mut self, message: impl Into<String>) {
        self.0.push(ValidationError::for_object(message));
    }

    /// Record an already constructed failure.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// `Ok(())` when valid, otherwise the report itself.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl Extend<ValidationError> for ValidationReport {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
