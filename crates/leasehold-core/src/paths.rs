//! Path resolution utilities.

use crate::env::{self, vars};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the Leasehold base directory (`$LEASEHOLD_HOME` or `~/.leasehold`).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    if let Some(home) = env::get_var(vars::LEASEHOLD_HOME) {
        return Ok(expand_tilde(&home));
    }
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".leasehold"))
}

/// Get the main config file path (~/.leasehold/leasehold.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(vars::LEASEHOLD_CONFIG) {
        return Ok(expand_tilde(&path));
    }
    Ok(base_dir()?.join("leasehold.json5"))
}

/// Get the encrypted credentials directory (~/.leasehold/credentials).
pub fn credentials_dir() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("credentials"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_dir_under_base() {
        let base = base_dir().unwrap();
        let creds = credentials_dir().unwrap();
        assert!(creds.starts_with(&base));
        assert!(creds.ends_with("credentials"));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/test");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/lib/x"), PathBuf::from("/var/lib/x"));
    }
}
