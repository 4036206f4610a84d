//! AES-256-GCM sealing with HKDF-SHA256 key derivation.
//!
//! The master secret is never used directly as a cipher key. Every sealed
//! value gets its own random salt, and a random nonce is prepended to the
//! ciphertext, so a caller only has to keep `(ciphertext, salt)`.
//!
//! Master secrets that come from people (environment variables, prompts)
//! go through [`derive_master`] first; HKDF alone does not slow down
//! guessing.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use argon2::Argon2;
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::BackendError;

pub const NONCE_SIZE: usize = 12;
pub const SALT_SIZE: usize = 32;
pub const KEY_SIZE: usize = 32;

/// HKDF info string used to domain-separate derived keys.
const HKDF_INFO: &[u8] = b"leasehold-credential-v1";

/// Application salt for passphrase stretching. Changing it invalidates
/// every existing file entry.
const PASSPHRASE_SALT: &[u8] = b"leasehold-file-backend-master-v1";

/// Stretch a passphrase into a 256-bit master secret with Argon2id
/// (default parameters).
pub fn derive_master(passphrase: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>, BackendError> {
    if passphrase.is_empty() {
        return Err(BackendError::Encryption("passphrase is empty".to_string()));
    }

    let mut master = Zeroizing::new([0u8; KEY_SIZE]);
    Argon2::default()
        .hash_password_into(passphrase, PASSPHRASE_SALT, &mut master[..])
        .map_err(|e| BackendError::Encryption(format!("passphrase derivation failed: {e}")))?;
    Ok(master)
}

/// Output of [`seal`].
pub struct Sealed {
    /// `nonce || ciphertext || tag`.
    pub ciphertext: Vec<u8>,
    pub salt: Vec<u8>,
}

fn derive_key(master: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; KEY_SIZE]>, BackendError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), master);
    let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
    hk.expand(HKDF_INFO, &mut okm[..])
        .map_err(|e| BackendError::Encryption(format!("key derivation failed: {e}")))?;
    Ok(okm)
}

/// Encrypt `plaintext` under a key derived from `master`.
pub fn seal(master: &[u8], plaintext: &[u8]) -> Result<Sealed, BackendError> {
    if master.is_empty() {
        return Err(BackendError::Encryption("master secret is empty".to_string()));
    }

    let mut salt = vec![0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let key = derive_key(master, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| BackendError::Encryption(e.to_string()))?;

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| BackendError::Encryption(e.to_string()))?;

    let mut ciphertext = Vec::with_capacity(NONCE_SIZE + sealed.len());
    ciphertext.extend_from_slice(&nonce_bytes);
    ciphertext.extend_from_slice(&sealed);

    Ok(Sealed { ciphertext, salt })
}

/// Decrypt data produced by [`seal`] with the same master secret.
pub fn open(master: &[u8], ciphertext: &[u8], salt: &[u8]) -> Result<Vec<u8>, BackendError> {
    if ciphertext.len() < NONCE_SIZE {
        return Err(BackendError::Decryption("ciphertext too short".to_string()));
    }

    let (nonce_bytes, body) = ciphertext.split_at(NONCE_SIZE);

    let key = derive_key(master, salt).map_err(|e| BackendError::Decryption(e.to_string()))?;
    let cipher = Aes256Gcm::new_from_slice(&key[..])
        .map_err(|e| BackendError::Decryption(e.to_string()))?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), body)
        .map_err(|e| BackendError::Decryption(e.to_string()))
}
