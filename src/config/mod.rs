use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
    storage::json_backend::{tmp_path, write_atomic},
};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub history_limit: usize,
    pub plain_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            plain_output: false,
        }
    }
}

/// Keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["data-file", "history-limit", "plain-output"];

impl Config {
    /// Data file location: `$BANK_LEDGER_DATA`, then the configured path
    /// (relative paths resolve against `base`), then `<base>/bank_data.json`.
    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        if let Some(path) = PathResolver::data_file_override() {
            return path;
        }
        match &self.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => PathResolver::default_data_file_in(base),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        match key {
            "data-file" => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(LedgerError::Config("data-file cannot be empty".into()));
                }
                self.data_file = Some(PathBuf::from(trimmed));
            }
            "history-limit" => {
                let limit: usize = value.trim().parse().map_err(|_| {
                    LedgerError::Config(format!("history-limit expects a number, got `{value}`"))
                })?;
                if limit == 0 {
                    return Err(LedgerError::Config(
                        "history-limit must be at least 1".into(),
                    ));
                }
                self.history_limit = limit;
            }
            "plain-output" => {
                self.plain_output = parse_flag(value).ok_or_else(|| {
                    LedgerError::Config(format!("plain-output expects on/off, got `{value}`"))
                })?;
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown key `{other}` (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Loads and saves [`Config`] under the application base directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        let path = PathResolver::config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            LedgerError::Config(format!("{}: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        config.set("history-limit", "25").unwrap();
        assert_eq!(config.history_limit, 25);
        assert!(config.set("history-limit", "0").is_err());
        assert!(config.set("history-limit", "many").is_err());
        config.set("plain-output", "on").unwrap();
        assert!(config.plain_output);
        assert!(config.set("plain-output", "maybe").is_err());
        assert!(matches!(
            config.set("colour", "red"),
            Err(LedgerError::Config(_))
        ));
    }

    #[test]
    fn relative_data_file_resolves_against_base() {
        let mut config = Config::default();
        config.set("data-file", "ledgers/main.json").unwrap();
        let base = PathBuf::from("/srv/bank");
        if PathResolver::data_file_override().is_none() {
            assert_eq!(
                config.resolve_data_file(&base),
                PathBuf::from("/srv/bank/ledgers/main.json")
            );
        }
    }

    #[test]
    fn manager_roundtrip_and_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());

        let mut config = Config::default();
        config.history_limit = 3;
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::create_dir_all(manager.path().parent().unwrap()).unwrap();
        fs::write(manager.path(), r#"{"plain_output": true}"#).unwrap();
        let config = manager.load().unwrap();
        assert!(config.plain_output);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
