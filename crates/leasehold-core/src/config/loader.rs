//! Configuration loading and persistence.

use super::{BackendKind, Config};
use crate::error::ConfigError;
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded config");
        Self::parse(&content)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; JSON is valid JSON5.
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let service = self.credentials.service.trim();
        if service.is_empty() {
            errors.push("Credential service name must not be empty".to_string());
        } else if service != self.credentials.service {
            errors.push(format!(
                "Credential service name '{}' has leading or trailing whitespace",
                self.credentials.service
            ));
        }

        if let Some(dir) = &self.credentials.dir {
            let raw = dir.to_string_lossy();
            if !dir.is_absolute() && !raw.starts_with("~/") {
                errors.push(format!(
                    "Credential directory '{}' must be absolute or start with '~/'",
                    raw
                ));
            }
            if self.credentials.backend != BackendKind::File {
                warn!(
                    backend = self.credentials.backend.as_str(),
                    "credentials.dir is only used by the file backend"
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Directory used by the encrypted file backend.
    pub fn credentials_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.credentials.dir {
            Some(dir) => Ok(paths::expand_tilde(&dir.to_string_lossy())),
            None => paths::credentials_dir(),
        }
    }
}
