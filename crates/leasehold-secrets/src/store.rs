//! The credential store.
//!
//! [`CredentialStore`] wraps a [`SecureBackend`] and fixes the failure
//! contract callers rely on:
//!
//! | operation  | backend error                  | missing key      |
//! |------------|--------------------------------|------------------|
//! | `store`    | [`CredentialError::Write`]     | n/a              |
//! | `retrieve` | `None` (logged)                | `None`           |
//! | `remove`   | [`CredentialError::Delete`]    | `Ok(())`         |
//!
//! Every operation is attempted exactly once. The store adds no locking of
//! its own; concurrent writes to one key race in the backend.

use std::sync::Arc;

use leasehold_core::SecretString;
use tracing::{debug, error, warn};

use crate::backend::SecureBackend;
use crate::error::{BackendError, CredentialError, Result};
use crate::key::{EncryptionKey, KeySource};

/// Outcome of a read before it is collapsed for callers.
#[derive(Debug)]
pub enum Lookup {
    Found(SecretString),
    NotFound,
    Failed(BackendError),
}

impl Lookup {
    /// Collapse to the caller-visible result: misses and failures both
    /// become `None`.
    pub fn into_option(self) -> Option<SecretString> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound | Lookup::Failed(_) => None,
        }
    }
}

/// Get/set/delete facade over a secure backend.
///
/// Built once by the application's composition root and shared, typically
/// behind an `Arc`.
pub struct CredentialStore {
    backend: Arc<dyn SecureBackend>,
    encryption_key: EncryptionKey,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn SecureBackend>, encryption_key: EncryptionKey) -> Self {
        debug!(
            backend = backend.name(),
            key_source = encryption_key.source().as_str(),
            "credential store ready"
        );
        Self {
            backend,
            encryption_key,
        }
    }

    /// Persist `value` under `key`, overwriting any previous value.
    pub async fn store(&self, key: &str, value: &str) -> Result<()> {
        match self.backend.set(key, value).await {
            Ok(()) => {
                debug!(key, backend = self.backend.name(), "stored credential");
                Ok(())
            }
            Err(source) => {
                error!(key, backend = self.backend.name(), "failed to store credential: {source}");
                Err(CredentialError::Write {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    /// Read the value under `key` without collapsing failures.
    pub async fn lookup(&self, key: &str) -> Lookup {
        match self.backend.get(key).await {
            Ok(Some(value)) => Lookup::Found(SecretString::new(value)),
            Ok(None) => Lookup::NotFound,
            Err(e) => Lookup::Failed(e),
        }
    }

    /// Return the value under `key`, or `None` when it is absent or the
    /// backend could not be read.
    pub async fn retrieve(&self, key: &str) -> Option<SecretString> {
        let lookup = self.lookup(key).await;
        match &lookup {
            Lookup::Found(_) => debug!(key, "retrieved credential"),
            Lookup::NotFound => debug!(key, "no credential stored"),
            Lookup::Failed(e) => {
                warn!(key, backend = self.backend.name(), "failed to read credential: {e}")
            }
        }
        lookup.into_option()
    }

    /// Delete the entry under `key`. Deleting a missing key succeeds.
    pub async fn remove(&self, key: &str) -> Result<()> {
        match self.backend.delete(key).await {
            Ok(()) => {
                debug!(key, backend = self.backend.name(), "removed credential");
                Ok(())
            }
            Err(source) => {
                error!(key, backend = self.backend.name(), "failed to delete credential: {source}");
                Err(CredentialError::Delete {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    pub fn encryption_key(&self) -> &str {
        self.encryption_key.expose()
    }

    pub fn key_source(&self) -> KeySource {
        self.encryption_key.source()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}
