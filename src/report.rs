//! The outcome of one validation call.

use stillwater::Validation;

use crate::error::ErrorMap;
use crate::path::FieldPath;

/// The immutable result of validating one data value against one schema.
///
/// Validity is derived from the error map: a report is valid exactly when no
/// field failed at any level.
///
/// # Example
///
/// ```rust
/// use hashcheck::{validate, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::new().rule("foo", "numeric").rule("bar", "string");
///
/// let report = validate(&Value::from(json!({ "foo": 1, "bar": "baz" })), &schema).unwrap();
/// assert!(report.is_valid());
/// assert!(report.errors().is_empty());
///
/// let report = validate(&Value::from(json!({ "foo": 1, "bar": 2 })), &schema).unwrap();
/// assert!(!report.is_valid());
/// assert_eq!(report.errors().to_json(), json!({ "bar": "string required" }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    errors: ErrorMap,
}

impl ValidationReport {
    pub(crate) fn new(errors: ErrorMap) -> Self {
        Self { errors }
    }

    /// Returns true if every schema check passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the nested error map; empty when valid.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Consumes the report, returning the error map.
    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }

    /// Returns the leaf message recorded at `path`, if any.
    pub fn error_at(&self, path: &FieldPath) -> Option<&str> {
        self.errors.message_at(path)
    }

    /// Converts into a `stillwater` validation for applicative composition.
    pub fn into_validation(self) -> Validation<(), ErrorMap> {
        if self.errors.is_empty() {
            Validation::Success(())
        } else {
            Validation::Failure(self.errors)
        }
    }
}

impl From<ValidationReport> for Validation<(), ErrorMap> {
    fn from(report: ValidationReport) -> Self {
        report.into_validation()
    }
}
