//! Encrypted file backend.
//!
//! Each credential is a JSON document at `{dir}/{key}.json` holding the
//! AES-256-GCM ciphertext (base64) and its HKDF salt (hex). Files are mode
//! `0600` and the directory `0700` on Unix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use super::{validate_key, SecureBackend};
use crate::crypto;
use crate::error::BackendError;

/// On-disk representation of an encrypted entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    /// `nonce || ciphertext || tag`, base64.
    ciphertext: String,
    /// HKDF salt, hex.
    salt: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// A directory of encrypted credential files.
pub struct FileBackend {
    dir: PathBuf,
    master: Zeroizing<[u8; crypto::KEY_SIZE]>,
}

impl FileBackend {
    /// Create a backend rooted at `dir`, sealing entries under a master
    /// secret stretched from `passphrase` with Argon2id.
    ///
    /// The stretching makes each guess expensive, but a short or published
    /// passphrase (such as the built-in default encryption key) is still
    /// guessable. Entries written under one passphrase cannot be read with
    /// another.
    pub fn new(
        dir: impl Into<PathBuf>,
        passphrase: impl AsRef<[u8]>,
    ) -> Result<Self, BackendError> {
        Ok(Self {
            dir: dir.into(),
            master: crypto::derive_master(passphrase.as_ref())?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn ensure_dir(&self) -> Result<(), BackendError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            tokio::fs::set_permissions(&self.dir, perms).await?;
        }

        Ok(())
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    async fn read_entry(&self, path: &Path) -> Result<Option<StoredEntry>, BackendError> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `data` to `path` through a temp file, mode 0600 on Unix.
///
/// Each call gets its own temp file, so concurrent writers to one key each
/// land a complete file and the last rename wins.
async fn write_entry_file(path: &Path, data: &[u8]) -> Result<(), BackendError> {
    let tmp = path.with_extension(format!("json.{:016x}.tmp", rand::random::<u64>()));
    let result = write_then_rename(&tmp, path, data).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    result
}

async fn write_then_rename(tmp: &Path, path: &Path, data: &[u8]) -> Result<(), BackendError> {
    tokio::fs::write(tmp, data).await?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(tmp, perms).await?;
    }

    tokio::fs::rename(tmp, path).await?;
    Ok(())
}

#[async_trait]
impl SecureBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        validate_key(key)?;
        self.ensure_dir().await?;

        let path = self.entry_path(key);
        let now = Utc::now();
        // A corrupt previous file must not block an overwrite.
        let created_at = match self.read_entry(&path).await {
            Ok(Some(previous)) => previous.created_at,
            _ => now,
        };

        let sealed = crypto::seal(&self.master[..], value.as_bytes())?;
        let entry = StoredEntry {
            ciphertext: base64::engine::general_purpose::STANDARD.encode(&sealed.ciphertext),
            salt: hex::encode(&sealed.salt),
            created_at,
            updated_at: now,
        };

        let json = serde_json::to_string_pretty(&entry)?;
        debug!(key, path = %path.display(), "writing credential file");
        write_entry_file(&path, json.as_bytes()).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        validate_key(key)?;

        let path = self.entry_path(key);
        let Some(entry) = self.read_entry(&path).await? else {
            return Ok(None);
        };

        let ciphertext = base64::engine::general_purpose::STANDARD
            .decode(&entry.ciphertext)
            .map_err(|e| BackendError::Decryption(format!("base64 decode failed: {e}")))?;
        let salt = hex::decode(&entry.salt)
            .map_err(|e| BackendError::Decryption(format!("hex decode failed: {e}")))?;

        let plaintext = crypto::open(&self.master[..], &ciphertext, &salt)?;
        let value = String::from_utf8(plaintext)
            .map_err(|e| BackendError::Decryption(format!("invalid UTF-8: {e}")))?;
        Ok(Some(value))
    }

    async fn delete(&self, key: &str) -> Result<(), BackendError> {
        validate_key(key)?;

        let path = self.entry_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, path = %path.display(), "deleted credential file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
