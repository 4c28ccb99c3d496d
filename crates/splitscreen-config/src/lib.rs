//! # splitscreen config
//!
//! Configuration management for the splitscreen server.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigIssue, ConfigValidator, ValidationResult};
