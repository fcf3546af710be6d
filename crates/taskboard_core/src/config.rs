//! Runtime configuration for dashboard front ends.
//!
//! Resolution order: built-in defaults, then `TASKBOARD_*` environment
//! variables, then explicit overrides applied by the caller (CLI flags).

use crate::logging::default_log_level;
use crate::repo::project_repo::DEFAULT_PROJECTS_KEY;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "TASKBOARD_DB_PATH";
pub const LOG_DIR_ENV: &str = "TASKBOARD_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TASKBOARD_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "taskboard-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Key the project list blob is stored under.
    pub storage_key: String,
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Must be absolute for logging to start.
    pub log_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let temp = std::env::temp_dir();
        Self {
            storage_key: DEFAULT_PROJECTS_KEY.to_string(),
            db_path: temp.join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: temp.join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl DashboardConfig {
    /// Defaults overlaid with `TASKBOARD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from `lookup`; blank values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(dir) = read(LOG_DIR_ENV) {
            config.log_dir = PathBuf::from(dir);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config
    }
}
