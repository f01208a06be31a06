//! Declarative schemas.
//!
//! A [`Schema`] maps field names to [`RuleNode`]s. A node either names a
//! registered rule or holds a nested schema that the field's value (which
//! must then be a hash) is checked against.
//!
//! # Example
//!
//! ```rust
//! use hashcheck::Schema;
//! use serde_json::json;
//!
//! let built = Schema::new()
//!     .rule("foo", "numeric")
//!     .rule("bar", "string")
//!     .nested("user", Schema::new().rule("first_name", "string").rule("age", "required"));
//!
//! let parsed = Schema::from_json(&json!({
//!     "foo": "numeric",
//!     "bar": "string",
//!     "user": { "first_name": "string", "age": "required" }
//! }))
//! .unwrap();
//!
//! assert_eq!(built, parsed);
//! ```

mod json;

use indexmap::IndexMap;

/// One entry of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleNode {
    /// Name of a registered validator.
    Rule(String),
    /// The field must be a hash satisfying this sub-schema.
    Nested(Schema),
}

impl From<&str> for RuleNode {
    fn from(name: &str) -> Self {
        RuleNode::Rule(name.to_string())
    }
}

impl From<String> for RuleNode {
    fn from(name: String) -> Self {
        RuleNode::Rule(name)
    }
}

impl From<Schema> for RuleNode {
    fn from(schema: Schema) -> Self {
        RuleNode::Nested(schema)
    }
}

/// A mapping from field name to [`RuleNode`].
///
/// The schema is a whitelist of checks, not a closed shape: data fields the
/// schema does not mention are ignored. Fields are checked in the order they
/// were added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: IndexMap<String, RuleNode>,
}

impl Schema {
    /// Creates an empty schema. An empty schema accepts any data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field checked by the rule registered as `rule`.
    pub fn rule(self, field: impl Into<String>, rule: impl Into<String>) -> Self {
        self.field(field, RuleNode::Rule(rule.into()))
    }

    /// Adds a field that must be a hash satisfying `schema`.
    pub fn nested(self, field: impl Into<String>, schema: Schema) -> Self {
        self.field(field, RuleNode::Nested(schema))
    }

    /// Adds a field with an arbitrary node, replacing any previous entry.
    pub fn field(mut self, field: impl Into<String>, node: impl Into<RuleNode>) -> Self {
        self.fields.insert(field.into(), node.into());
        self
    }

    /// Returns the node for `field`.
    pub fn get(&self, field: &str) -> Option<&RuleNode> {
        self.fields.get(field)
    }

    /// Iterates over the fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleNode)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of fields at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this level has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn entry_at(&self, index: usize) -> Option<(&str, &RuleNode)> {
        self.fields.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    /// Returns every rule name referenced anywhere in the schema, sorted and
    /// deduplicated.
    pub fn rule_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut pending = vec![self];
        while let Some(schema) = pending.pop() {
            for node in schema.fields.values() {
                match node {
                    RuleNode::Rule(name) => names.push(name.clone()),
                    RuleNode::Nested(sub) => pending.push(sub),
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }
}

// Flattens nested schemas before dropping so deep schemas do not recurse.
impl Drop for Schema {
    fn drop(&mut self) {
        let mut pending: Vec<Schema> = Vec::new();
        let mut fields = std::mem::take(&mut self.fields);
        loop {
            pending.extend(fields.drain(..).filter_map(|(_, node)| match node {
                RuleNode::Nested(schema) => Some(schema),
                RuleNode::Rule(_) => None,
            }));
            match pending.pop() {
                Some(mut schema) => fields = std::mem::take(&mut schema.fields),
                None => break,
            }
        }
    }
}

impl<K: Into<String>, N: Into<RuleNode>> FromIterator<(K, N)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, n)| (k.into(), n.into()))
                .collect(),
        }
    }
}
