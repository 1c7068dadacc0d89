//! # Chatsweep Config
//!
//! Configuration management for chatsweep, including the built-in
//! platform descriptor tables.

mod error;
mod loader;
mod platforms;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use platforms::{builtin_platforms, merge_platforms};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
