use std::path::PathBuf;

use log::debug;

/// Environment variable overriding the data file location.
pub const DATA_FILE_ENV: &str = "FINANCE_TRACKER_DATA";

pub const STORAGE_FILE_NAME: &str = "finance-tracker-transactions.json";

const APP_DIR: &str = "finance-tracker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
}

impl Config {
    /// Uses `data_file` when given (flag or environment), otherwise the
    /// per-user data directory.
    pub fn resolve(data_file: Option<PathBuf>) -> Self {
        let data_file = data_file.unwrap_or_else(default_data_file);
        debug!("using data file {}", data_file.display());
        Self { data_file }
    }
}

/// `<data dir>/finance-tracker/finance-tracker-transactions.json`, or the
/// bare file name in the working directory when the platform has no data dir.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(STORAGE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(STORAGE_FILE_NAME))
}
