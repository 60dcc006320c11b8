use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".debt_ledger";
const HOME_ENV: &str = "DEBT_LEDGER_HOME";
const STORE_DIR: &str = "store";
const CONFIG_FILE: &str = "config.json";

/// Returns the application data directory, defaulting to `~/.debt_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the key-value store files.
pub fn store_dir_in(base: &Path) -> PathBuf {
    base.join(STORE_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
