use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::PathResolver,
    errors::{ResaleError, Result},
    utils::persistence::write_atomic,
};

/// User preferences applied when the front end pre-fills forms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    /// Platform fee fraction proposed for new sales.
    #[serde(default)]
    pub default_platform_fee: f64,
    /// Auto-delete flag proposed for new items.
    #[serde(default)]
    pub delete_when_sold_out: bool,
    /// Overrides where the catalog and legacy files live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            default_platform_fee: 0.0,
            delete_when_sold_out: false,
            data_dir: None,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(ResaleError::Config("currency must not be empty".into()));
        }
        if !self.default_platform_fee.is_finite()
            || !(0.0..=1.0).contains(&self.default_platform_fee)
        {
            return Err(ResaleError::Config(format!(
                "default platform fee {} must be between 0 and 1",
                self.default_platform_fee
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Loads the stored config, falling back to defaults when none exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| ResaleError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_when_missing() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            currency: "EUR".into(),
            default_platform_fee: 0.13,
            delete_when_sold_out: true,
            data_dir: None,
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn rejects_fee_above_one() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = Config {
            default_platform_fee: 1.5,
            ..Config::default()
        };
        assert!(matches!(manager.save(&config), Err(ResaleError::Config(_))));
        assert!(!manager.path().exists());
    }
}
