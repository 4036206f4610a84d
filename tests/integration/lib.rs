//! Shared helpers for the Leasehold integration tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use leasehold_secrets::{BackendError, MemoryBackend, SecureBackend};

/// Memory backend with switchable fault injection.
#[derive(Default)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, on: bool) {
        self.fail_reads.store(on, Ordering::SeqCst);
    }

    /// Fail both `set` and `delete`.
    pub fn fail_writes(&self, on: bool) {
        self.fail_writes.store(on, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), BackendError> {
        if flag.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("injected fault".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SecureBackend for FlakyBackend {
    fn name(&self) -> &'static str {
        "flaky"
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        Self::check(&self.fail_writes)?;
        self.inner.set(key, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Self::check(&self.fail_reads)?;
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        Self::check(&self.fail_writes)?;
        self.inner.delete(key).await
    }
}
