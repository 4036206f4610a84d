//! Error types for credential storage.

use thiserror::Error;

/// Failures reported by a [`SecureBackend`](crate::backend::SecureBackend).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Invalid credential key: {0}")]
    InvalidKey(String),

    #[error("Backend task failed: {0}")]
    Task(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced to callers of [`CredentialStore`](crate::store::CredentialStore).
///
/// Only writes and deletes produce these. Reads collapse every failure into
/// "no value".
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to store credential '{key}'")]
    Write {
        key: String,
        #[source]
        source: BackendError,
    },

    #[error("failed to delete credential '{key}'")]
    Delete {
        key: String,
        #[source]
        source: BackendError,
    },
}

impl CredentialError {
    /// Key of the entry the failed operation targeted.
    pub fn key(&self) -> &str {
        match self {
            CredentialError::Write { key, .. } | CredentialError::Delete { key, .. } => key,
        }
    }
}

/// Convenience result alias for store operations.
pub type Result<T> = std::result::Result<T, CredentialError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_write_error_keeps_source() {
        let err = CredentialError::Write {
            key: "session_token".to_string(),
            source: BackendError::Keyring("locked".to_string()),
        };
        assert_eq!(err.to_string(), "failed to store credential 'session_token'");
        assert_eq!(err.key(), "session_token");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Keyring error: locked".to_string())
        );
    }
}
