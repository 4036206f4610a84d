//! OS credential store backend.
//!
//! `keyring` maps to macOS Keychain, Windows Credential Manager, or the
//! Linux kernel keyring. Its calls block, so each one runs on the tokio
//! blocking pool.

use async_trait::async_trait;
use tracing::debug;

use super::SecureBackend;
use crate::error::BackendError;

/// Backend storing each credential as a keyring entry `(service, key)`.
pub struct KeyringBackend {
    service: String,
}

impl KeyringBackend {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    async fn with_entry<T, F>(&self, key: &str, op: F) -> Result<T, BackendError>
    where
        T: Send + 'static,
        F: FnOnce(::keyring::Entry) -> Result<T, ::keyring::Error> + Send + 'static,
    {
        let service = self.service.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let entry = ::keyring::Entry::new(&service, &key).map_err(map_error)?;
            op(entry).map_err(map_error)
        })
        .await
        .map_err(|e| BackendError::Task(e.to_string()))?
    }
}

fn map_error(err: ::keyring::Error) -> BackendError {
    match err {
        ::keyring::Error::NoStorageAccess(e) => BackendError::Unavailable(e.to_string()),
        other => BackendError::Keyring(other.to_string()),
    }
}

#[async_trait]
impl SecureBackend for KeyringBackend {
    fn name(&self) -> &'static str {
        "keyring"
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        debug!(service = %self.service, key, "writing keyring entry");
        let value = value.to_string();
        self.with_entry(key, move |entry| entry.set_password(&value))
            .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.with_entry(key, |entry| match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(::keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e),
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        debug!(service = %self.service, key, "deleting keyring entry");
        self.with_entry(key, |entry| match entry.delete_credential() {
            Ok(()) | Err(::keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e),
        })
        .await
    }
}
