//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable as a boolean.
pub fn get_bool(name: &str) -> bool {
    get_var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Environment variable names read by Leasehold.
pub mod vars {
    /// Encryption key handed to the credential store.
    pub const LEASEHOLD_ENCRYPTION_KEY: &str = "LEASEHOLD_ENCRYPTION_KEY";

    /// Leasehold home directory override.
    pub const LEASEHOLD_HOME: &str = "LEASEHOLD_HOME";

    /// Leasehold config file override.
    pub const LEASEHOLD_CONFIG: &str = "LEASEHOLD_CONFIG";

    /// Emit logs as JSON lines.
    pub const LEASEHOLD_LOG_JSON: &str = "LEASEHOLD_LOG_JSON";
}
