//! Process-level wiring: config loading, logging, and store construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use leasehold_core::config::{BackendKind, Config, LoggingConfig};
use leasehold_core::env::{self, vars};
use leasehold_core::{paths, ConfigError};
use leasehold_secrets::{
    CredentialStore, EncryptionKey, FileBackend, KeyringBackend, MemoryBackend, SecureBackend,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Loaded configuration plus where it came from.
///
/// A missing config file yields defaults; an unreadable one is kept as an
/// error so `config path` and `config validate` still work.
pub struct Context {
    config_path: PathBuf,
    loaded: Result<Config, ConfigError>,
}

impl Context {
    /// Load the config from `override_path` or the default location.
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = match override_path {
            Some(path) => path.to_path_buf(),
            None => paths::config_file()?,
        };
        let loaded = match Config::load(&config_path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        };
        Ok(Self {
            config_path,
            loaded,
        })
    }

    /// Build a context around an in-memory config.
    pub fn with_config(config_path: PathBuf, config: Config) -> Self {
        Self {
            config_path,
            loaded: Ok(config),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn config(&self) -> anyhow::Result<&Config> {
        self.loaded.as_ref().map_err(|e| {
            anyhow::anyhow!(
                "failed to load config {}: {}",
                self.config_path.display(),
                e
            )
        })
    }

    /// Logging settings, falling back to defaults when the config is broken.
    pub fn logging(&self) -> LoggingConfig {
        self.loaded
            .as_ref()
            .map(|c| c.logging.clone())
            .unwrap_or_default()
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level; each `-v` raises the level
/// one step.
pub fn init_logging(logging: &LoggingConfig, verbose: u8) {
    let level = match verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    // Target matching is by prefix, so this covers every leasehold_* crate.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("leasehold={level}").into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json || env::get_bool(vars::LEASEHOLD_LOG_JSON) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Construct the configured secure backend.
///
/// The file backend is sealed under a master secret stretched from the
/// resolved encryption key.
pub fn build_backend(
    config: &Config,
    key: &EncryptionKey,
) -> anyhow::Result<Arc<dyn SecureBackend>> {
    let backend: Arc<dyn SecureBackend> = match config.credentials.backend {
        BackendKind::Keyring => {
            let backend = KeyringBackend::new(&config.credentials.service);
            debug!(service = backend.service(), "using OS keyring backend");
            Arc::new(backend)
        }
        BackendKind::File => {
            let dir = config
                .credentials_dir()
                .context("failed to resolve credentials directory")?;
            let backend = FileBackend::new(dir, key.expose())
                .context("failed to derive file backend master secret")?;
            debug!(dir = %backend.dir().display(), "using encrypted file backend");
            Arc::new(backend)
        }
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
    };
    Ok(backend)
}

/// Build the credential store for this process.
pub fn build_store(config: &Config, key: EncryptionKey) -> anyhow::Result<CredentialStore> {
    let backend = build_backend(config, &key)?;
    debug!(
        backend = backend.name(),
        key_source = key.source().as_str(),
        "opening credential store"
    );
    Ok(CredentialStore::new(backend, key))
}
