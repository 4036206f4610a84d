//! Secure key-value backends.
//!
//! A [`SecureBackend`] is the platform service the credential store talks
//! to. It reports absence as `Ok(None)` on reads and as success on deletes;
//! everything else is a [`BackendError`].

mod file;
mod os_keyring;
mod memory;

use async_trait::async_trait;

use crate::error::BackendError;

pub use self::file::FileBackend;
pub use self::os_keyring::KeyringBackend;
pub use self::memory::MemoryBackend;

/// Maximum allowed length for a credential key.
pub const MAX_KEY_LEN: usize = 128;

/// Async interface to a platform secure key-value store.
#[async_trait]
pub trait SecureBackend: Send + Sync {
    /// Short identifier used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Fetch the value under `key`, or `None` when no entry exists.
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Remove the entry under `key`. Removing a missing entry succeeds.
    async fn delete(&self, key: &str) -> Result<(), BackendError>;
}

/// Validate that a credential key is safe to use as a file or keyring name.
///
/// Allowed: ASCII alphanumeric, underscore, hyphen, dot (not leading).
/// Max length 128.
pub fn validate_key(key: &str) -> Result<(), BackendError> {
    if key.is_empty() {
        return Err(BackendError::InvalidKey("key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(BackendError::InvalidKey(format!(
            "key exceeds maximum length of {MAX_KEY_LEN} characters"
        )));
    }
    if key.starts_with('.') {
        return Err(BackendError::InvalidKey(format!(
            "key must not start with '.': {key}"
        )));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(BackendError::InvalidKey(format!(
            "key contains invalid characters (allowed: alphanumeric, underscore, hyphen, dot): {key}"
        )));
    }
    Ok(())
}
