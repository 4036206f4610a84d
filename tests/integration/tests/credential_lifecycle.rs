//! End-to-end credential store behavior across backends.

use std::sync::Arc;

use leasehold_integration_tests::FlakyBackend;
use leasehold_secrets::{
    BackendError, CredentialError, CredentialStore, EncryptionKey, FileBackend, Lookup,
};
use tempfile::TempDir;

fn read(value: Option<leasehold_secrets::SecretString>) -> Option<String> {
    value.map(|v| v.expose_secret().to_string())
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let key = EncryptionKey::explicit("integration-key");

    {
        let backend = Arc::new(FileBackend::new(dir.path(), key.expose()).unwrap());
        let store = CredentialStore::new(backend, key.clone());
        store.store("user_token", "tok-abc").await.unwrap();
        store.store("refresh_token", "ref-xyz").await.unwrap();
    }

    let backend = Arc::new(FileBackend::new(dir.path(), key.expose()).unwrap());
    let store = CredentialStore::new(backend, key);
    assert_eq!(read(store.retrieve("user_token").await).as_deref(), Some("tok-abc"));
    assert_eq!(read(store.retrieve("refresh_token").await).as_deref(), Some("ref-xyz"));

    store.remove("user_token").await.unwrap();
    assert!(store.retrieve("user_token").await.is_none());
    store.remove("user_token").await.unwrap();
}

#[tokio::test]
async fn test_invalid_key_fails_loud_on_write_quiet_on_read() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::new(
        Arc::new(FileBackend::new(dir.path(), "k").unwrap()),
        EncryptionKey::explicit("k"),
    );

    let err = store.store("../escape", "v").await.unwrap_err();
    assert!(matches!(
        err,
        CredentialError::Write {
            source: BackendError::InvalidKey(_),
            ..
        }
    ));
    assert!(store.retrieve("../escape").await.is_none());
    assert!(matches!(
        store.remove("../escape").await,
        Err(CredentialError::Delete { .. })
    ));
}

#[tokio::test]
async fn test_read_fault_is_absent_then_recovers() {
    let backend = Arc::new(FlakyBackend::new());
    let store = CredentialStore::new(backend.clone(), EncryptionKey::explicit("k"));

    store.store("user_token", "v").await.unwrap();

    backend.fail_reads(true);
    assert!(store.retrieve("user_token").await.is_none());
    assert!(matches!(store.lookup("user_token").await, Lookup::Failed(_)));

    backend.fail_reads(false);
    assert_eq!(read(store.retrieve("user_token").await).as_deref(), Some("v"));
}

#[tokio::test]
async fn test_write_fault_leaves_previous_value() {
    let backend = Arc::new(FlakyBackend::new());
    let store = CredentialStore::new(backend.clone(), EncryptionKey::explicit("k"));

    store.store("user_token", "old").await.unwrap();

    backend.fail_writes(true);
    assert!(matches!(
        store.store("user_token", "new").await,
        Err(CredentialError::Write { .. })
    ));
    assert!(matches!(
        store.remove("user_token").await,
        Err(CredentialError::Delete { .. })
    ));

    assert_eq!(read(store.retrieve("user_token").await).as_deref(), Some("old"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_same_key_writes_race_last_one_wins() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(CredentialStore::new(
        Arc::new(FileBackend::new(dir.path(), "k").unwrap()),
        EncryptionKey::explicit("k"),
    ));

    for _ in 0..10 {
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.store("user_token", &format!("value_{i}")).await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }

        let value = read(store.retrieve("user_token").await).unwrap();
        let written: Vec<String> = (0..16).map(|i| format!("value_{i}")).collect();
        assert!(written.contains(&value), "unexpected value {value}");
    }
}

#[tokio::test]
async fn test_distinct_keys_across_tasks() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(CredentialStore::new(
        Arc::new(FileBackend::new(dir.path(), "k").unwrap()),
        EncryptionKey::explicit("k"),
    ));

    let mut handles = Vec::new();
    for i in 0..4 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            let key = format!("tenant_{i}");
            store.store(&key, "token").await?;
            store.remove(&key).await
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }
    for i in 0..4 {
        assert!(store.retrieve(&format!("tenant_{i}")).await.is_none());
    }
}
