//! Field and whole-object validation.
//!
//! Validation never short-circuits. Every field validation runs in
//! descriptor order, then the model's whole-object hook, and every failure
//! lands in one [`ValidationReport`].

mod report;

pub use report::{ValidationError, ValidationReport};

use crate::descriptor::{FieldDescriptorTable, describe};
use crate::model::Model;

/// Every validation failure of `model`.
#[must_use]
pub fn validate<M: Model>(model: &M) -> ValidationReport {
    check(&describe::<M>(), model)
}

pub(crate) fn check<M>(table: &FieldDescriptorTable<M>, model: &M) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in table.fields() {
        for validation in field.validations() {
            if !validation.passes(model) {
                report.push_field(field.name(), validation.message());
            }
        }
    }
    table.run_object_validation(model, &mut report);
    report
}

#[cfg(test)]
mod tests;
