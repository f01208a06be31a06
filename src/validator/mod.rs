//! Named predicates over single values.
//!
//! A [`Validator`] is what a schema leaf refers to by name. The crate ships
//! the [`BuiltinRule`]s; applications add their own either by implementing
//! the trait or by wrapping a closure in a [`SimpleValidator`].
//!
//! # Example
//!
//! ```rust
//! use hashcheck::{build_validator, Validator, Value};
//!
//! let positive = build_validator("positive", |v| matches!(v, Value::Integer(i) if *i > 0));
//!
//! assert_eq!(positive.name(), "positive");
//! assert!(positive.is_valid(&Value::from(3)));
//! assert_eq!(positive.error_message(), "positive required");
//! ```

mod builtin;
mod simple;

pub use builtin::BuiltinRule;
pub use simple::{build_validator, SimpleValidator};

use crate::value::Value;

/// A named predicate with a fixed failure message.
///
/// Absent fields are passed to [`is_valid`](Validator::is_valid) as
/// [`Value::Null`], so presence and nullness are judged the same way.
///
/// The `Send + Sync` bounds let validators live in the shared registry.
pub trait Validator: Send + Sync {
    /// The rule name schemas use to refer to this validator.
    fn name(&self) -> &str;

    /// Returns true if `value` satisfies the rule.
    fn is_valid(&self, value: &Value) -> bool;

    /// The message recorded when the rule fails.
    fn error_message(&self) -> String {
        format!("{} required", self.name())
    }
}

/// Checks that a validator exposes a usable rule name.
pub(crate) fn check_conformance(validator: &dyn Validator) -> Result<(), String> {
    let name = validator.name();
    if name.is_empty() {
        return Err("validator name must not be empty".to_string());
    }
    Ok(())
}
