//! CLI command implementations.

pub mod config;
pub mod credentials;
pub mod key;
