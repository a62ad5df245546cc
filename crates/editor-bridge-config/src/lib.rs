//! # Editor Bridge Config
//!
//! Configuration for the editor bridge: context detection hints, outbound
//! messaging, locator synthesis, overlay geometry and composer behavior.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
