//! The rules every registry starts with.

use super::Validator;
use crate::value::Value;

/// Built-in type and presence rules.
///
/// Every type rule reports `"<name> required"` whether the field is missing
/// or has the wrong type; only [`BuiltinRule::Required`] says `"is required"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
    /// `hash`: the value is a nested hash.
    Hash,
    /// `required`: the value is present and not null.
    Required,
    /// `string`: the value is a string.
    String,
    /// `numeric`: the value is an integer or float. Numeric strings fail.
    Numeric,
    /// `array`: the value is an array.
    Array,
    /// `time`: the value is a time instant. Timestamp strings fail.
    Time,
}

impl BuiltinRule {
    /// All built-ins, in registration order.
    pub const ALL: [BuiltinRule; 6] = [
        BuiltinRule::Hash,
        BuiltinRule::Required,
        BuiltinRule::String,
        BuiltinRule::Numeric,
        BuiltinRule::Array,
        BuiltinRule::Time,
    ];

    /// Returns the rule name.
    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinRule::Hash => "hash",
            BuiltinRule::Required => "required",
            BuiltinRule::String => "string",
            BuiltinRule::Numeric => "numeric",
            BuiltinRule::Array => "array",
            BuiltinRule::Time => "time",
        }
    }
}

impl Validator for BuiltinRule {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn is_valid(&self, value: &Value) -> bool {
        match self {
            BuiltinRule::Hash => matches!(value, Value::Hash(_)),
            BuiltinRule::Required => !value.is_null(),
            BuiltinRule::String => matches!(value, Value::String(_)),
            BuiltinRule::Numeric => value.is_numeric(),
            BuiltinRule::Array => matches!(value, Value::Array(_)),
            BuiltinRule::Time => matches!(value, Value::Time(_)),
        }
    }

    fn error_message(&self) -> String {
        match self {
            BuiltinRule::Required => "is required".to_string(),
            other => format!("{} required", other.as_str()),
        }
    }
}
