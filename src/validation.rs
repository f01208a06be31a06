//! The schema/data walk.
//!
//! Each level checks the schema's own fields against the data hash at that
//! level and builds its own partial [`ErrorMap`]. When a level finishes, its
//! map is merged into the parent's with [`Semigroup::combine`], so no
//! accumulator is shared between branches.
//!
//! Levels are kept on an explicit heap stack rather than the call stack, so
//! nesting depth is limited by memory only.

use std::sync::Arc;

use indexmap::IndexMap;
use stillwater::prelude::*;
use tracing::trace;

use crate::error::{ConfigurationError, ErrorMap};
use crate::schema::{RuleNode, Schema};
use crate::validator::{BuiltinRule, Validator};
use crate::value::Value;

/// Rule name to validator. Registry snapshots are immutable values of this type.
pub(crate) type RuleMap = IndexMap<String, Arc<dyn Validator>>;

/// Stand-in passed to predicates for fields absent from the data.
static MISSING: Value = Value::Null;

/// Position inside one schema level.
struct Cursor<'s> {
    schema: &'s Schema,
    next: usize,
    /// Field of the parent level this schema hangs under; `None` at the root.
    field: Option<&'s str>,
}

impl<'s> Cursor<'s> {
    fn new(schema: &'s Schema, field: Option<&'s str>) -> Self {
        Self {
            schema,
            next: 0,
            field,
        }
    }

    fn advance(&mut self) -> Option<(&'s str, &'s RuleNode)> {
        let schema: &'s Schema = self.schema;
        let entry = schema.entry_at(self.next)?;
        self.next += 1;
        Some(entry)
    }
}

/// One level of the data walk.
struct Frame<'d, 's> {
    cursor: Cursor<'s>,
    data: &'d Value,
    errors: ErrorMap,
}

impl<'d, 's> Frame<'d, 's> {
    fn new(data: &'d Value, schema: &'s Schema, field: Option<&'s str>) -> Self {
        Self {
            cursor: Cursor::new(schema, field),
            data,
            errors: ErrorMap::new(),
        }
    }

    fn record(&mut self, errors: ErrorMap) {
        let current = std::mem::take(&mut self.errors);
        self.errors = current.combine(errors);
    }
}

fn unknown_rule<'s>(
    rule: &str,
    parents: impl Iterator<Item = Option<&'s str>>,
    field: &'s str,
) -> ConfigurationError {
    ConfigurationError::UnknownRule {
        rule: rule.to_string(),
        path: parents.flatten().chain([field]).collect(),
    }
}

/// Fails with the first rule (in schema order, depth-first) that `rules`
/// does not contain.
pub(crate) fn check_rules(schema: &Schema, rules: &RuleMap) -> Result<(), ConfigurationError> {
    let mut stack = vec![Cursor::new(schema, None)];

    while let Some(cursor) = stack.last_mut() {
        let Some((field, node)) = cursor.advance() else {
            stack.pop();
            continue;
        };
        match node {
            RuleNode::Rule(rule) if !rules.contains_key(rule) => {
                return Err(unknown_rule(rule, stack.iter().map(|c| c.field), field));
            }
            RuleNode::Rule(_) => {}
            RuleNode::Nested(sub) => stack.push(Cursor::new(sub, Some(field))),
        }
    }
    Ok(())
}

/// Validates `data` against `schema` and returns the nested errors.
///
/// `data` need not be a hash: if it is not, every schema field reads as
/// missing. An empty schema never produces errors.
pub(crate) fn validate_hash(
    data: &Value,
    schema: &Schema,
    rules: &RuleMap,
) -> Result<ErrorMap, ConfigurationError> {
    let mut stack = vec![Frame::new(data, schema, None)];

    while let Some(frame) = stack.last_mut() {
        let Some((field, node)) = frame.cursor.advance() else {
            let Some(done) = stack.pop() else { break };
            match (stack.last_mut(), done.cursor.field) {
                (Some(parent), Some(field)) => parent.record(ErrorMap::nested(field, done.errors)),
                _ => return Ok(done.errors),
            }
            continue;
        };

        let data: &Value = frame.data;
        let value = data.get(field);
        match node {
            RuleNode::Nested(sub) => match value {
                Some(nested @ Value::Hash(_)) => {
                    trace!(field, depth = stack.len(), "descending into nested schema");
                    stack.push(Frame::new(nested, sub, Some(field)));
                }
                _ => frame.record(ErrorMap::message(
                    field,
                    BuiltinRule::Hash.error_message(),
                )),
            },
            RuleNode::Rule(rule) => match rules.get(rule) {
                Some(validator) => {
                    if !validator.is_valid(value.unwrap_or(&MISSING)) {
                        frame.record(ErrorMap::message(field, validator.error_message()));
                    }
                }
                None => {
                    return Err(unknown_rule(
                        rule,
                        stack.iter().map(|f| f.cursor.field),
                        field,
                    ));
                }
            },
        }
    }

    Ok(ErrorMap::new())
}
