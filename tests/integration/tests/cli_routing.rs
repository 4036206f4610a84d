//! CLI routing through the library entry point.

use clap::Parser;
use leasehold_cli::{run, Cli, Context};
use leasehold_core::config::{BackendKind, Config};
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[tokio::test]
async fn test_version_runs() {
    let ctx = Context::with_config("/tmp/unused.json5".into(), Config::default());
    run(parse(&["leasehold", "version"]), ctx).await.unwrap();
}

#[tokio::test]
async fn test_credentials_roundtrip_with_file_backend() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.credentials.backend = BackendKind::File;
    config.credentials.dir = Some(dir.path().join("creds"));
    let config_path = dir.path().join("leasehold.json5");
    config.save(&config_path).unwrap();

    let ctx = || Context::load(Some(config_path.as_path())).unwrap();

    run(
        parse(&["leasehold", "credentials", "set", "session_token", "--value", "abc"]),
        ctx(),
    )
    .await
    .unwrap();
    assert!(dir.path().join("creds").join("session_token.json").exists());

    run(parse(&["leasehold", "credentials", "get", "session_token"]), ctx())
        .await
        .unwrap();

    run(parse(&["leasehold", "creds", "rm", "session_token"]), ctx())
        .await
        .unwrap();
    assert!(!dir.path().join("creds").join("session_token.json").exists());

    let missing = run(parse(&["leasehold", "credentials", "get", "session_token"]), ctx()).await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn test_broken_config_fails_credentials_but_not_path() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("leasehold.json5");
    std::fs::write(&config_path, "{ credentials: { backend: 42 } }").unwrap();

    let result = run(
        parse(&["leasehold", "credentials", "get", "x"]),
        Context::load(Some(config_path.as_path())).unwrap(),
    )
    .await;
    assert!(result.is_err());

    run(
        parse(&["leasehold", "config", "path"]),
        Context::load(Some(config_path.as_path())).unwrap(),
    )
    .await
    .unwrap();
}
