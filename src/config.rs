//! User configuration loaded from `config.toml`.
//!
//! The configuration directory is taken from `UTILKIT_CONFIG_DIR` when set,
//! otherwise from the platform config directory (`~/.config/utilkit` on Linux).
//! A missing file means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants;

/// Settings read from `config.toml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// History file used when `--history-file` is not given.
    pub history_file: PathBuf,
    /// Built-in plugins that should not be loaded.
    pub disabled_plugins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: constants::DEFAULT_LOG_LEVEL.to_string(),
            history_file: PathBuf::from(constants::DEFAULT_HISTORY_FILE),
            disabled_plugins: Vec::new(),
        }
    }
}

/// Where the configuration directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `UTILKIT_CONFIG_DIR`.
    Environment,
    /// Platform configuration directory.
    Platform,
    /// No directory could be determined; defaults only.
    Defaults,
}

/// Failures while reading `config.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolve the configuration directory.
pub fn config_dir() -> (Option<PathBuf>, ConfigSource) {
    if let Some(dir) = std::env::var_os(constants::ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
        return (Some(PathBuf::from(dir)), ConfigSource::Environment);
    }
    match dirs::config_dir() {
        Some(dir) => (Some(dir.join(constants::APP_NAME)), ConfigSource::Platform),
        None => (None, ConfigSource::Defaults),
    }
}

/// Load the configuration from the resolved directory.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> Result<(AppConfig, ConfigSource), ConfigError> {
    let (dir, source) = config_dir();
    let config = match dir {
        Some(dir) => load_from(&dir)?,
        None => AppConfig::default(),
    };
    Ok((config, source))
}

/// Load `config.toml` from `dir`, falling back to defaults when it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_from(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(constants::CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
}
