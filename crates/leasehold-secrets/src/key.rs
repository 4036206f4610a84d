//! Encryption-key resolution.
//!
//! The key is read once, when the composition root builds the store:
//! 1. `LEASEHOLD_ENCRYPTION_KEY` (empty counts as unset)
//! 2. [`DEFAULT_ENCRYPTION_KEY`], a placeholder that is never fit for production
//!
//! The store treats the value as opaque configuration.

use std::fmt;

use leasehold_core::env::{self, vars};
use leasehold_core::SecretString;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Environment variable holding the encryption key.
pub const ENCRYPTION_KEY_ENV: &str = vars::LEASEHOLD_ENCRYPTION_KEY;

/// Fallback used when no key is configured. Placeholder only.
pub const DEFAULT_ENCRYPTION_KEY: &str = "leasehold-default-encryption-key";

/// Where the resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    Explicit,
    Default,
}

impl KeySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeySource::Environment => "environment",
            KeySource::Explicit => "explicit",
            KeySource::Default => "default",
        }
    }
}

/// A resolved, read-only encryption key.
#[derive(Clone)]
pub struct EncryptionKey {
    value: SecretString,
    source: KeySource,
}

impl EncryptionKey {
    /// Resolve the key from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(env::get_var)
    }

    /// Resolve the key through `lookup`, which maps a variable name to its
    /// value. Empty values are treated as unset.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENCRYPTION_KEY_ENV).filter(|v| !v.is_empty()) {
            Some(value) => {
                debug!(source = "environment", "resolved encryption key");
                Self {
                    value: SecretString::new(value),
                    source: KeySource::Environment,
                }
            }
            None => {
                warn!(
                    "{ENCRYPTION_KEY_ENV} is not set; using the built-in placeholder key. \
                     Set it before storing real credentials."
                );
                Self {
                    value: SecretString::new(DEFAULT_ENCRYPTION_KEY),
                    source: KeySource::Default,
                }
            }
        }
    }

    /// Use an explicit value, e.g. one read from a secrets manager.
    pub fn explicit(value: impl Into<String>) -> Self {
        Self {
            value: SecretString::new(value),
            source: KeySource::Explicit,
        }
    }

    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn source(&self) -> KeySource {
        self.source
    }

    pub fn is_default(&self) -> bool {
        self.source == KeySource::Default
    }

    /// First 8 bytes of the SHA-256 digest, hex-encoded. Safe to display.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.expose().as_bytes());
        hex::encode(&digest[..8])
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("source", &self.source)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}
