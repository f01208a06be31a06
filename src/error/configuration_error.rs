//! Setup errors raised by the registry and schema construction.

use crate::path::FieldPath;

/// A programmer or setup mistake.
///
/// Unlike data mismatches, which only ever appear in a
/// [`ValidationReport`](crate::ValidationReport), these are returned as `Err`
/// and must be handled by the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A validator with the same name is already registered.
    #[error("validators need to have unique names: '{0}' is already registered")]
    DuplicateName(String),

    /// The candidate does not expose a usable validator name.
    #[error("validators need to inherit from Base: {reason}")]
    NotAValidator { reason: String },

    /// A schema references a rule that is not registered.
    #[error("unknown rule '{rule}' referenced at {path}")]
    UnknownRule { rule: String, path: FieldPath },

    /// A JSON schema node is neither a rule name nor a nested object.
    #[error("invalid rule node at {path}: expected a rule name or a nested schema, got {found}")]
    InvalidRuleNode { path: FieldPath, found: &'static str },
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ConfigurationError>();
    assert_sync::<ConfigurationError>();
};
