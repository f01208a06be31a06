//! Rule registry for named validators.
//!
//! This module provides the [`RuleRegistry`] type that stores validators by
//! name and resolves schema leaves against them, plus the process-wide
//! registry used by the crate-level [`validate`] function.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::ConfigurationError;
use crate::path::FieldPath;
use crate::report::ValidationReport;
use crate::schema::Schema;
use crate::validation::{check_rules, validate_hash, RuleMap};
use crate::validator::{check_conformance, BuiltinRule, SimpleValidator, Validator};
use crate::value::Value;

/// Shared storage holding the current immutable snapshot.
type RuleStore = Arc<RwLock<Arc<RuleMap>>>;

/// A thread-safe, append-only registry of validators.
///
/// # Thread Safety
///
/// Registration is serialized by a write lock and publishes a new immutable
/// snapshot of the rule map. Every validation call reads one snapshot up
/// front, so a registration racing with validation is either fully visible
/// to it or not at all.
///
/// Clones share the same rules.
///
/// # Example
///
/// ```rust
/// use hashcheck::{RuleRegistry, Schema, Value};
/// use serde_json::json;
///
/// let registry = RuleRegistry::new();
/// registry
///     .register_rule("positive", |v| matches!(v, Value::Integer(i) if *i > 0))
///     .unwrap();
///
/// let schema = Schema::new().rule("age", "positive");
/// let report = registry.validate(&Value::from(json!({ "age": -1 })), &schema).unwrap();
/// assert_eq!(report.errors().to_json(), json!({ "age": "positive required" }));
/// ```
pub struct RuleRegistry {
    rules: RuleStore,
}

impl RuleRegistry {
    /// Creates a registry holding the built-in rules.
    pub fn new() -> Self {
        let rules: RuleMap = BuiltinRule::ALL
            .iter()
            .map(|rule| (rule.as_str().to_string(), Arc::new(*rule) as Arc<dyn Validator>))
            .collect();
        Self::from_map(rules)
    }

    /// Creates a registry with no rules at all.
    pub fn empty() -> Self {
        Self::from_map(RuleMap::new())
    }

    fn from_map(rules: RuleMap) -> Self {
        Self {
            rules: Arc::new(RwLock::new(Arc::new(rules))),
        }
    }

    /// Registers a validator under its own name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NotAValidator` if the validator's name is
    /// not a usable rule name, and `ConfigurationError::DuplicateName` if the
    /// name is already taken.
    pub fn register<V>(&self, validator: V) -> Result<(), ConfigurationError>
    where
        V: Validator + 'static,
    {
        self.register_arc(Arc::new(validator))
    }

    /// Registers an already shared validator.
    pub fn register_arc(&self, validator: Arc<dyn Validator>) -> Result<(), ConfigurationError> {
        if let Err(reason) = check_conformance(&*validator) {
            warn!(%reason, "rejected validator registration");
            return Err(ConfigurationError::NotAValidator { reason });
        }

        let name = validator.name().to_string();
        let mut rules = self.rules.write();

        if rules.contains_key(&name) {
            warn!(rule = %name, "rejected duplicate validator registration");
            return Err(ConfigurationError::DuplicateName(name));
        }

        // Copies the map only if a reader still holds the current snapshot.
        Arc::make_mut(&mut *rules).insert(name.clone(), validator);
        debug!(rule = %name, total = rules.len(), "registered validator");
        Ok(())
    }

    /// Builds a [`SimpleValidator`] from `name` and `predicate` and registers it.
    pub fn register_rule<F>(
        &self,
        name: impl Into<String>,
        predicate: F,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.register(SimpleValidator::new(name, predicate))
    }

    /// Retrieves a validator by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.rules.read().get(name).cloned()
    }

    /// Retrieves a validator by name, failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnknownRule` if `name` is not registered.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Validator>, ConfigurationError> {
        self.get(name).ok_or_else(|| ConfigurationError::UnknownRule {
            rule: name.to_string(),
            path: FieldPath::root(),
        })
    }

    /// Returns true if a validator named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.rules.read().keys().cloned().collect()
    }

    /// Lists rule names used by `schema` that are not registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hashcheck::{RuleRegistry, Schema};
    ///
    /// let registry = RuleRegistry::new();
    /// let schema = Schema::new().rule("id", "uuid").rule("name", "string");
    /// assert_eq!(registry.unresolved_rules(&schema), vec!["uuid"]);
    /// ```
    pub fn unresolved_rules(&self, schema: &Schema) -> Vec<String> {
        let rules = self.snapshot();
        schema
            .rule_names()
            .into_iter()
            .filter(|name| !rules.contains_key(name))
            .collect()
    }

    /// Validates `data` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnknownRule` if the schema names a rule
    /// that is not registered. This is checked for the whole schema before
    /// any data is inspected. Data mismatches never produce an `Err`.
    pub fn validate(
        &self,
        data: &Value,
        schema: &Schema,
    ) -> Result<ValidationReport, ConfigurationError> {
        let rules = self.snapshot();
        check_rules(schema, &rules).inspect_err(|e| warn!(error = %e, "schema rejected"))?;

        let errors = validate_hash(data, schema, &rules)?;
        let report = ValidationReport::new(errors);
        debug!(
            valid = report.is_valid(),
            failed_fields = report.errors().len(),
            "validation finished"
        );
        Ok(report)
    }

    /// Validates many data values against one schema in parallel.
    ///
    /// Reports are returned in input order.
    pub fn validate_batch(
        &self,
        items: &[Value],
        schema: &Schema,
    ) -> Result<Vec<ValidationReport>, ConfigurationError> {
        let rules = self.snapshot();
        check_rules(schema, &rules).inspect_err(|e| warn!(error = %e, "schema rejected"))?;

        let reports = items
            .par_iter()
            .map(|item| validate_hash(item, schema, &rules).map(ValidationReport::new))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            items = reports.len(),
            invalid = reports.iter().filter(|r| !r.is_valid()).count(),
            "batch validation finished"
        );
        Ok(reports)
    }

    fn snapshot(&self) -> Arc<RuleMap> {
        Arc::clone(&self.rules.read())
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for RuleRegistry {
    fn clone(&self) -> Self {
        Self {
            rules: Arc::clone(&self.rules),
        }
    }
}

/// Returns the process-wide registry, installing the built-ins on first use.
pub fn registry() -> &'static RuleRegistry {
    static GLOBAL: OnceLock<RuleRegistry> = OnceLock::new();
    GLOBAL.get_or_init(RuleRegistry::new)
}

/// Validates `data` against `schema` using the process-wide registry.
///
/// # Errors
///
/// Returns `ConfigurationError::UnknownRule` if the schema names an
/// unregistered rule.
///
/// # Example
///
/// ```rust
/// use hashcheck::{validate, Schema, Value};
/// use serde_json::json;
///
/// let report = validate(&Value::from(json!({ "v": "" })), &Schema::new().nested("v", Schema::new())).unwrap();
/// assert_eq!(report.errors().to_json(), json!({ "v": "hash required" }));
/// ```
pub fn validate(data: &Value, schema: &Schema) -> Result<ValidationReport, ConfigurationError> {
    registry().validate(data, schema)
}

/// Validates many values in parallel using the process-wide registry.
pub fn validate_batch(
    items: &[Value],
    schema: &Schema,
) -> Result<Vec<ValidationReport>, ConfigurationError> {
    registry().validate_batch(items, schema)
}

/// Registers a validator with the process-wide registry.
///
/// Register custom rules during startup, before validation traffic begins.
pub fn register_validator<V>(validator: V) -> Result<(), ConfigurationError>
where
    V: Validator + 'static,
{
    registry().register(validator)
}

/// Registers a closure-backed rule with the process-wide registry.
pub fn register_rule<F>(name: impl Into<String>, predicate: F) -> Result<(), ConfigurationError>
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    registry().register_rule(name, predicate)
}
