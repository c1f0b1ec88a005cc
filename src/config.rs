// ⚙️ Configuration
// Defaults, then an optional TOML file (ROSTER_CONFIG), then env overrides.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid api_url {0:?}: expected an http(s) URL")]
    InvalidUrl(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the remote collection, e.g. "http://localhost:8000/api"
    pub api_url: String,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Directory for the log file (the terminal belongs to the UI)
    pub log_dir: PathBuf,

    pub log_file: String,

    /// tracing EnvFilter directive; RUST_LOG wins when set
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: PathBuf::from("."),
            log_file: "roster-admin.log".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for environment variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("ROSTER_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                    path: path.clone(),
                    source,
                })?;
                Self::from_toml_str(&text)?
            }
            None => Config::default(),
        };

        if let Some(url) = lookup("ROSTER_API_URL") {
            config.api_url = url;
        }
        if let Some(secs) = lookup("ROSTER_TIMEOUT_SECS") {
            config.request_timeout_secs =
                secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ROSTER_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
        }
        if let Some(dir) = lookup("ROSTER_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(filter) = lookup("ROSTER_LOG_FILTER") {
            config.log_filter = filter;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url)
            .map_err(|_| ConfigError::InvalidUrl(self.api_url.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(self.api_url.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
