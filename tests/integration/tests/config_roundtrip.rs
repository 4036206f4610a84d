//! Config save/load roundtrip integration tests.

use std::path::Path;

use leasehold_core::config::{BackendKind, Config, LogLevel};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("leasehold.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.credentials.backend, config.credentials.backend);
    assert_eq!(loaded.credentials.service, config.credentials.service);
    assert_eq!(loaded.logging.level, config.logging.level);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("leasehold.json5");

    let mut config = Config::default();
    config.credentials.backend = BackendKind::File;
    config.credentials.dir = Some(dir.path().join("creds"));
    config.logging.level = LogLevel::Warn;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.credentials.backend, BackendKind::File);
    assert_eq!(loaded.credentials_dir().unwrap(), dir.path().join("creds"));
    assert_eq!(loaded.logging.level, LogLevel::Warn);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_config_load_nonexistent() {
    assert!(Config::load(Path::new("/nonexistent/leasehold.json5")).is_err());
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid json").is_err());
}
