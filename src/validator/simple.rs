//! Closure-backed validators.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::Validator;
use crate::value::Value;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A validator built from a name and a predicate closure.
///
/// Use this instead of writing a new type for every custom rule.
///
/// # Example
///
/// ```rust
/// use hashcheck::{SimpleValidator, Validator, Value};
///
/// let flag = SimpleValidator::new("flag", |v| matches!(v, Value::Bool(_)))
///     .with_message("must be true or false");
///
/// assert!(flag.is_valid(&Value::from(true)));
/// assert_eq!(flag.error_message(), "must be true or false");
/// ```
#[derive(Clone)]
pub struct SimpleValidator {
    name: String,
    predicate: Predicate,
    message: Option<String>,
}

impl SimpleValidator {
    /// Creates a validator named `name` that accepts values for which
    /// `predicate` returns true.
    ///
    /// The failure message is `"<name> required"` unless overridden with
    /// [`with_message`](Self::with_message).
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            message: None,
        }
    }

    /// Creates a validator accepting strings that match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashcheck::{SimpleValidator, Validator, Value};
    ///
    /// let zip = SimpleValidator::pattern("zip", r"^\d{5}$").unwrap();
    /// assert!(zip.is_valid(&Value::from("12345")));
    /// assert!(!zip.is_valid(&Value::from(12345)));
    /// ```
    pub fn pattern(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(Self::new(name, move |value| {
            value.as_str().is_some_and(|s| regex.is_match(s))
        }))
    }

    /// Sets a custom failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Validator for SimpleValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn error_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("{} required", self.name))
    }
}

impl fmt::Debug for SimpleValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Builds a [`SimpleValidator`] from a name and a predicate.
pub fn build_validator<F>(name: impl Into<String>, predicate: F) -> SimpleValidator
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    SimpleValidator::new(name, predicate)
}
