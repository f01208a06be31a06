//! Error types.
//!
//! [`ConfigurationError`] reports setup mistakes (bad registrations, unknown
//! rules, malformed schemas). [`ErrorMap`] is the nested validation report
//! produced for data that does not satisfy a schema; it is never raised.

mod configuration_error;
mod error_map;

pub use configuration_error::ConfigurationError;
pub use error_map::{ErrorMap, FieldError};
