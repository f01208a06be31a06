//! # Hashcheck
//!
//! Validates an arbitrarily nested key-value structure against a declarative
//! schema of named rules, reporting every failure in a nested error map that
//! mirrors the schema instead of stopping at the first problem.
//!
//! ## Core Types
//!
//! - [`Value`]: the data tree being validated
//! - [`Schema`]: field name to rule name, or to a nested [`Schema`]
//! - [`Validator`]: a named predicate with a fixed failure message
//! - [`RuleRegistry`]: the validators a schema can refer to
//! - [`ValidationReport`]: validity plus the nested [`ErrorMap`]
//!
//! Data mismatches are never errors: they only show up in the report.
//! Setup mistakes (duplicate rule names, unknown rules, malformed schemas)
//! are returned as [`ConfigurationError`].
//!
//! ## Example
//!
//! ```rust
//! use hashcheck::{validate, Schema, Value};
//! use serde_json::json;
//!
//! let schema = Schema::from_json(&json!({
//!     "foo": "numeric",
//!     "bar": "string",
//!     "user": { "first_name": "string", "age": "required", "likes": "array" }
//! }))
//! .unwrap();
//!
//! let data = Value::from(json!({
//!     "foo": 1,
//!     "bar": 2,
//!     "user": { "first_name": "James", "last_name": "Brooks", "likes": "Ruby, Kendo" }
//! }));
//!
//! let report = validate(&data, &schema).unwrap();
//! assert!(!report.is_valid());
//! assert_eq!(
//!     report.errors().to_json(),
//!     json!({
//!         "bar": "string required",
//!         "user": { "age": "is required", "likes": "array required" }
//!     })
//! );
//! ```

pub mod error;
pub mod path;
pub mod registry;
pub mod report;
pub mod schema;
mod validation;
pub mod validator;
pub mod value;

pub use error::{ConfigurationError, ErrorMap, FieldError};
pub use path::FieldPath;
pub use registry::{
    register_rule, register_validator, registry, validate, validate_batch, RuleRegistry,
};
pub use report::ValidationReport;
pub use schema::{RuleNode, Schema};
pub use validator::{build_validator, BuiltinRule, SimpleValidator, Validator};
pub use value::Value;
