//! The nested error report.
//!
//! An [`ErrorMap`] has the same shape as the schema that produced it, but only
//! contains the branches that failed. A nested map is never stored empty, so
//! `is_empty()` means "no errors" at every level.

use std::fmt::{self, Display};

use indexmap::map::Entry;
use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::path::FieldPath;

/// The error recorded for a single schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A rule failed; holds the rule's message (e.g. `"string required"`).
    Message(String),
    /// A nested schema failed; holds that level's errors.
    Nested(ErrorMap),
}

impl FieldError {
    /// Returns the message if this is a leaf error.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            FieldError::Message(message) => Some(message),
            FieldError::Nested(_) => None,
        }
    }

    /// Returns the nested map if this is a nested error.
    pub fn as_nested(&self) -> Option<&ErrorMap> {
        match self {
            FieldError::Message(_) => None,
            FieldError::Nested(errors) => Some(errors),
        }
    }
}

/// Field name to error, in schema order.
///
/// # Example
///
/// ```rust
/// use hashcheck::{validate, Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .rule("bar", "string")
///     .nested("user", Schema::new().rule("age", "required"));
/// let data = Value::from(json!({ "bar": 2, "user": {} }));
///
/// let report = validate(&data, &schema).unwrap();
/// assert_eq!(
///     report.errors().to_json(),
///     json!({ "bar": "string required", "user": { "age": "is required" } })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorMap(IndexMap<String, FieldError>);

impl ErrorMap {
    /// Creates an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding one leaf error.
    pub(crate) fn message(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut map = IndexMap::new();
        map.insert(field.into(), FieldError::Message(message.into()));
        Self(map)
    }

    /// Creates a map holding one nested error map, or an empty map if
    /// `errors` is itself empty.
    pub(crate) fn nested(field: impl Into<String>, errors: ErrorMap) -> Self {
        if errors.is_empty() {
            return Self::new();
        }
        let mut map = IndexMap::new();
        map.insert(field.into(), FieldError::Nested(errors));
        Self(map)
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failing fields at this level.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the error recorded for `field` at this level.
    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Iterates over this level's failing fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the leaf message at `path`, if any.
    ///
    /// Returns `None` for the root path and for paths that end at a nested map.
    pub fn message_at(&self, path: &FieldPath) -> Option<&str> {
        let mut segments = path.segments();
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_nested()?.get(segment)?;
        }
        current.as_message()
    }

    /// Lists every leaf error with its full path, depth-first in schema order.
    pub fn flatten(&self) -> Vec<(FieldPath, &str)> {
        let mut out = Vec::new();
        let mut stack = vec![(FieldPath::root(), self.0.iter())];
        while let Some((base, entries)) = stack.last_mut() {
            let Some((field, error)) = entries.next() else {
                stack.pop();
                continue;
            };
            let path = base.push(field.as_str());
            match error {
                FieldError::Message(message) => out.push((path, message.as_str())),
                FieldError::Nested(nested) => stack.push((path, nested.0.iter())),
            }
        }
        out
    }

    /// Renders the map as JSON with the same nesting.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .0
            .iter()
            .map(|(field, error)| {
                let value = match error {
                    FieldError::Message(message) => serde_json::Value::String(message.clone()),
                    FieldError::Nested(nested) => nested.to_json(),
                };
                (field.clone(), value)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Union of two maps. Nested maps under the same key are merged; for
/// conflicting leaf messages the first one wins.
impl Semigroup for ErrorMap {
    fn combine(mut self, mut other: Self) -> Self {
        let mut merged = std::mem::take(&mut self.0);
        for (field, error) in std::mem::take(&mut other.0) {
            match merged.entry(field) {
                Entry::Vacant(slot) => {
                    slot.insert(error);
                }
                Entry::Occupied(mut slot) => {
                    if let (FieldError::Nested(left), FieldError::Nested(right)) =
                        (slot.get_mut(), error)
                    {
                        let existing = std::mem::take(left);
                        *left = existing.combine(right);
                    }
                }
            }
        }
        ErrorMap(merged)
    }
}

// Flattens nested maps before dropping so deep reports do not recurse.
impl Drop for ErrorMap {
    fn drop(&mut self) {
        let mut pending: Vec<ErrorMap> = Vec::new();
        let mut entries = std::mem::take(&mut self.0);
        loop {
            pending.extend(entries.drain(..).filter_map(|(_, error)| match error {
                FieldError::Nested(nested) => Some(nested),
                FieldError::Message(_) => None,
            }));
            match pending.pop() {
                Some(mut map) => entries = std::mem::take(&mut map.0),
                None => break,
            }
        }
    }
}

impl Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, message) in self.flatten() {
            writeln!(f, "{}: {}", path, message)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorMap {
    type Item = (&'a String, &'a FieldError);
    type IntoIter = indexmap::map::Iter<'a, String, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ErrorMap {
        ErrorMap::message("bar", "string required").combine(ErrorMap::nested(
            "user",
            ErrorMap::message("age", "is required")
                .combine(ErrorMap::message("likes", "array required")),
        ))
    }

    #[test]
    fn test_nested_with_empty_map_is_empty() {
        let errors = ErrorMap::nested("user", ErrorMap::new());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_to_json_mirrors_shape() {
        assert_eq!(
            sample().to_json(),
            json!({
                "bar": "string required",
                "user": { "age": "is required", "likes": "array required" }
            })
        );
    }

    #[test]
    fn test_message_at() {
        let errors = sample();
        let age = FieldPath::root().push("user").push("age");

        assert_eq!(errors.message_at(&age), Some("is required"));
        assert_eq!(errors.message_at(&FieldPath::from_field("bar")), Some("string required"));
        assert_eq!(errors.message_at(&FieldPath::from_field("user")), None);
        assert_eq!(errors.message_at(&FieldPath::root()), None);
        assert_eq!(errors.message_at(&FieldPath::from_field("foo")), None);
    }

    #[test]
    fn test_flatten_in_schema_order() {
        let errors = sample();
        let flat: Vec<_> = errors
            .flatten()
            .into_iter()
            .map(|(path, message)| (path.to_string(), message))
            .collect();

        assert_eq!(
            flat,
            vec![
                ("bar".to_string(), "string required"),
                ("user.age".to_string(), "is required"),
                ("user.likes".to_string(), "array required"),
            ]
        );
    }

    #[test]
    fn test_combine_merges_nested_maps() {
        let left = ErrorMap::nested("user", ErrorMap::message("age", "is required"));
        let right = ErrorMap::nested("user", ErrorMap::message("likes", "array required"));

        let merged = left.combine(right);
        assert_eq!(merged.len(), 1);
        let user = merged.get("user").and_then(FieldError::as_nested).unwrap();
        assert_eq!(user.len(), 2);
    }

    #[test]
    fn test_combine_keeps_first_leaf_and_position() {
        let left = ErrorMap::message("a", "first")
            .combine(ErrorMap::message("b", "b"))
            .combine(ErrorMap::message("c", "c"));
        let merged = left.combine(ErrorMap::message("a", "second"));

        let keys: Vec<_> = merged.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(merged.get("a").and_then(FieldError::as_message), Some("first"));
    }

    #[test]
    fn test_semigroup_associativity() {
        let e1 = ErrorMap::message("a", "1");
        let e2 = ErrorMap::nested("n", ErrorMap::message("b", "2"));
        let e3 = ErrorMap::nested("n", ErrorMap::message("c", "3"));

        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        let right = e1.combine(e2.combine(e3));
        assert_eq!(left, right);
    }

    #[test]
    fn test_flatten_deep_map() {
        const DEPTH: usize = 2_000;
        let mut errors = ErrorMap::message("leaf", "string required");
        for _ in 0..DEPTH {
            errors = ErrorMap::nested("n", errors);
        }

        let flat = errors.flatten();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].0.len(), DEPTH + 1);
        assert_eq!(flat[0].1, "string required");
    }

    #[test]
    fn test_display_lists_paths() {
        let display = sample().to_string();
        assert!(display.contains("bar: string required"));
        assert!(display.contains("user.age: is required"));
        assert!(display.contains("user.likes: array required"));
    }
}
