//! Secure credential storage for Leasehold.
//!
//! [`CredentialStore`] is a small get/set/delete facade over a platform
//! secure key-value service ([`SecureBackend`]). Writes and deletes fail
//! loudly with a [`CredentialError`]; reads never fail and report any
//! problem as "no value".
//!
//! Backends:
//! - [`KeyringBackend`]: the OS credential store via the `keyring` crate
//! - [`FileBackend`]: AES-256-GCM encrypted files, one per entry
//! - [`MemoryBackend`]: process-local, for tests and ephemeral sessions

pub mod backend;
pub mod crypto;
pub mod error;
pub mod key;
pub mod store;

pub use backend::{FileBackend, KeyringBackend, MemoryBackend, SecureBackend};
pub use error::{BackendError, CredentialError, Result};
pub use key::{EncryptionKey, KeySource, DEFAULT_ENCRYPTION_KEY};
pub use store::{CredentialStore, Lookup};

pub use leasehold_core::SecretString;
