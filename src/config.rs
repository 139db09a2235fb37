//! Configuration file handling for ascii-store.
//!
//! Loads configuration from `~/.config/ascii-store/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::art::StyleCode;
use crate::codec::CodecKind;
use crate::retry::{RetryPolicy, DEFAULT_BACKOFF_STEP, DEFAULT_MAX_ATTEMPTS};
use crate::store::FileStore;
use crate::upload::UploadManager;

/// Environment variable overriding the storage directory.
pub const STORE_DIR_ENV: &str = "ASCII_STORE_DIR";

/// Configuration file structure for ascii-store.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
    /// "reference" or "chunked"
    pub codec: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UploadsConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_resize_percentage")]
    pub resize_percentage: f64,
    #[serde(default)]
    pub style: Option<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            resize_percentage: default_resize_percentage(),
            style: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

fn default_resize_percentage() -> f64 {
    100.0
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_backoff_ms() -> u64 {
    DEFAULT_BACKOFF_STEP.as_millis() as u64
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Storage directory: `$ASCII_STORE_DIR`, then the config file, then
    /// the platform default.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir_with(std::env::var_os(STORE_DIR_ENV).map(PathBuf::from))
    }

    fn storage_dir_with(&self, env_override: Option<PathBuf>) -> PathBuf {
        env_override
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| self.storage.dir.clone())
            .unwrap_or_else(FileStore::default_dir)
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.uploads
            .dir
            .clone()
            .unwrap_or_else(UploadManager::default_dir)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.backoff_ms),
        )
    }

    /// Default style for conversions.
    pub fn style(&self) -> Result<StyleCode, ConfigError> {
        match self.convert.style.as_deref() {
            None => Ok(StyleCode::default()),
            Some(name) => StyleCode::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
                key: "convert.style",
                value: name.to_string(),
            }),
        }
    }

    pub fn codec_kind(&self) -> Result<CodecKind, ConfigError> {
        match self.storage.codec.as_deref() {
            None => Ok(CodecKind::default()),
            Some(name) => CodecKind::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
                key: "storage.codec",
                value: name.to_string(),
            }),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        key: &'static str,
        value: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-store").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-store/config.toml")
        })
}

/// Template written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# ascii-store configuration

[storage]
# Directory holding stored images (overridden by $ASCII_STORE_DIR)
# dir = "/var/lib/ascii-store"
# Codec strategy: reference, chunked
codec = "reference"

[uploads]
# Staging directory for images awaiting conversion
# dir = "/tmp/ascii-store/uploads"

[convert]
# Scale factor in percent (capped at 200)
resize_percentage = 100.0
# Style: white-on-black, black-on-white
style = "white-on-black"

[retry]
# Attempts to open a file that is still being written
max_attempts = 5
# Backoff step in milliseconds (pause before attempt n is n * step)
backoff_ms = 100
"#;
