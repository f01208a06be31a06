//! Building schemas from JSON documents.
//!
//! JSON strings become rule names and JSON objects become nested schemas.
//! Anything else is a malformed schema.

use serde_json::Value as Json;

use super::{RuleNode, Schema};
use crate::error::ConfigurationError;
use crate::path::FieldPath;

impl Schema {
    /// Parses a schema from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidRuleNode`] if the root is not an
    /// object or any node is neither a string nor an object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashcheck::Schema;
    /// use serde_json::json;
    ///
    /// assert!(Schema::from_json(&json!({ "v": {} })).is_ok());
    /// assert!(Schema::from_json(&json!({ "v": 3 })).is_err());
    /// ```
    pub fn from_json(json: &Json) -> Result<Self, ConfigurationError> {
        parse_level(json, &FieldPath::root())
    }
}

impl TryFrom<Json> for Schema {
    type Error = ConfigurationError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        Schema::from_json(&json)
    }
}

fn parse_level(json: &Json, path: &FieldPath) -> Result<Schema, ConfigurationError> {
    let object = json
        .as_object()
        .ok_or_else(|| ConfigurationError::InvalidRuleNode {
            path: path.clone(),
            found: json_type_name(json),
        })?;

    object
        .iter()
        .map(|(field, node)| {
            let field_path = path.push(field.as_str());
            let node = match node {
                Json::String(rule) => RuleNode::Rule(rule.clone()),
                Json::Object(_) => RuleNode::Nested(parse_level(node, &field_path)?),
                other => {
                    return Err(ConfigurationError::InvalidRuleNode {
                        path: field_path,
                        found: json_type_name(other),
                    })
                }
            };
            Ok((field.clone(), node))
        })
        .collect()
}

fn json_type_name(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
