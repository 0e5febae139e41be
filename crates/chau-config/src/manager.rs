use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chau_core::fs_util::write_atomic;

use crate::{Config, ConfigError, Theme};

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "CHAU_MONEY_HOME";
const DEFAULT_DIR_NAME: &str = ".chau_money";

/// Returns the application data directory, defaulting to `~/.chau_money`.
pub fn default_base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self::new(config_dir.join("config.json")))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.config_path.exists() {
            let data = fs::read_to_string(&self.config_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        write_atomic(&self.config_path, &json)?;
        Ok(())
    }

    /// Persists only the theme flag, keeping every other stored value.
    pub fn set_theme(&self, theme: Theme) -> Result<Config, ConfigError> {
        let mut config = self.load()?;
        config.theme = theme;
        self.save(&config)?;
        Ok(config)
    }
}
