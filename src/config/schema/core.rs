mod env_overrides;
mod loader;

use super::{LoggingConfig, MemoryConfig};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory - computed at load time, not serialized
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Empty or absent means summaries stay local and classification reports
    /// missing credentials
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default)]
    pub temperature: f64,
    /// Document summarized when a SUMMARIZE command names no file
    #[serde(default = "default_summary_file")]
    pub default_summary_file: String,
    /// Base directory for relative filenames; the process working directory when unset
    #[serde(default)]
    pub workspace_dir: Option<String>,

    #[serde(default)]
    pub memory: MemoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_summary_file() -> String {
    "data/princess_bride.txt".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            config_path: PathBuf::new(),
            api_key: None,
            api_base_url: default_api_base_url(),
            default_model: default_model(),
            temperature: 0.0,
            default_summary_file: default_summary_file(),
            workspace_dir: None,
            memory: MemoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Configured API key, treating blank values as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Expand `~` and anchor relative paths at the data directory.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let expanded = shellexpand::tilde(raw.trim());
        let path = Path::new(expanded.as_ref());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn memory_path(&self) -> PathBuf {
        self.resolve_path(&self.memory.file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.resolve_path(&self.logging.file)
    }

    pub fn summary_file_path(&self) -> PathBuf {
        self.resolve_path(&self.default_summary_file)
    }

    /// Absolute base directory the executor resolves relative filenames
    /// against. A relative `workspace_dir` is anchored at the working directory.
    pub fn workspace_path(&self) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        match self.workspace_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => cwd.join(shellexpand::tilde(dir).as_ref()),
            _ => cwd,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_model.trim().is_empty() {
            return Err(ConfigError::Validation("default_model must not be empty".into()));
        }

        let base = url::Url::parse(&self.api_base_url).map_err(|e| {
            ConfigError::Validation(format!("api_base_url '{}' is invalid: {e}", self.api_base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api_base_url must use http or https, got '{}'",
                base.scheme()
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }

        self.logging.max_level()?;
        Ok(())
    }
}
