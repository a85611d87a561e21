use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".bank_ledger";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const DATA_FILE: &str = "bank_data.json";

pub const HOME_ENV: &str = "BANK_LEDGER_HOME";
pub const DATA_ENV: &str = "BANK_LEDGER_DATA";

/// Resolves on-disk locations relative to an application base directory.
pub struct PathResolver;

impl PathResolver {
    /// `$BANK_LEDGER_HOME`, falling back to `~/.bank_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(base: Option<PathBuf>) -> PathBuf {
        base.unwrap_or_else(Self::base_dir)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }

    pub fn default_data_file_in(base: &Path) -> PathBuf {
        base.join(DATA_FILE)
    }

    /// Per-process override of the data file location.
    pub fn data_file_override() -> Option<PathBuf> {
        env::var_os(DATA_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
