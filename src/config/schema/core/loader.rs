use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const DATA_DIR_ENV: &str = "STARK_DATA_DIR";

impl Config {
    /// Load `~/.stark-assistant/config.toml`, writing defaults on first run.
    ///
    /// `STARK_DATA_DIR` relocates the whole data directory.
    pub fn load_or_init() -> Result<Self> {
        let data_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => {
                PathBuf::from(shellexpand::tilde(dir.trim()).as_ref())
            }
            _ => UserDirs::new()
                .map(|u| u.home_dir().join(".stark-assistant"))
                .context("Could not find home directory")?,
        };
        Self::load_or_init_at(&data_dir)
    }

    pub fn load_or_init_at(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join("config.toml");

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).with_context(|| {
                format!("Failed to create data directory {}", data_dir.display())
            })?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path.clone_from(&config_path);
            config.data_dir = data_dir.to_path_buf();
            Ok(config)
        } else {
            let config = Self {
                config_path,
                data_dir: data_dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
