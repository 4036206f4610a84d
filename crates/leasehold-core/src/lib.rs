//! # leasehold-core
//!
//! Shared building blocks for the Leasehold crates:
//!
//! - **Configuration**: loading, validation, and persistence of the JSON5 config file
//! - **Paths**: resolution of the `~/.leasehold` directory tree
//! - **Environment**: variable lookup helpers with empty-means-unset semantics
//! - **Secrets**: [`SecretString`], a zero-on-drop string for sensitive values

pub mod config;
pub mod env;
pub mod error;
pub mod paths;
pub mod secret;

pub use config::Config;
pub use error::ConfigError;
pub use secret::SecretString;
