use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::Level;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; relative paths resolve against the data directory
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_file() -> String {
    "logs/assistant.log".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(self.level.trim()).map_err(|_| {
            ConfigError::Validation(format!("unknown log level '{}'", self.level))
        })
    }
}
