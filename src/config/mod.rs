//! Configuration management for Tributary.
//!
//! Configuration is read from `~/.config/tributary/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::PodcastOptions;
use crate::fetcher::http_fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub fetch: FetchConfig,
    pub podcast: PodcastDefaults,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file; `~/.tributary.db` when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Applied to new podcasts when the command line leaves them out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodcastDefaults {
    pub download_directory: Option<PathBuf>,
    pub recent_entries: Option<usize>,
}

impl PodcastDefaults {
    pub fn options(
        &self,
        download_directory: Option<PathBuf>,
        recent_entries: Option<usize>,
    ) -> PodcastOptions {
        PodcastOptions {
            download_directory: download_directory.or_else(|| self.download_directory.clone()),
            recent_entries: recent_entries.or(self.recent_entries),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/tributary/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tributary").join("config.toml"))
    }

    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.store.path {
            Some(path) => Ok(path.clone()),
            None => {
                let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
                Ok(home.join(".tributary.db"))
            }
        }
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        format!(
            r##"# Tributary Configuration

[store]
# Where subscriptions are kept. Defaults to ~/.tributary.db
# path = "/home/me/.tributary.db"

[fetch]
# Whole-request timeout for feed fetches, in seconds
timeout_secs = {}
user_agent = "{}"

[podcast]
# Defaults for `tributary add` when not given on the command line
# download_directory = "/home/me/Podcasts"
# recent_entries = 10
"##,
            DEFAULT_TIMEOUT.as_secs(),
            DEFAULT_USER_AGENT
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
