//! Application configuration.
//!
//! Field limits and formats are fixed constants. The few user-adjustable
//! defaults (default project, status and priority, page size, database
//! location) live in `config.json` inside the data directory; a missing
//! file means "use the defaults".

use super::data_storage::DataStorage;
use super::task::{TaskPriority, TaskStatus};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATABASE_NAME: &str = "tasks.db";
/// Appended to the database path for the copy taken before a schema rebuild.
pub const BACKUP_SUFFIX: &str = ".backup";

pub const DEFAULT_PROJECT: &str = "learning";
pub const DEFAULT_PROJECT_COLOR: &str = "#2563eb";
/// Number of tasks fetched per page.
pub const BATCH_SIZE: usize = 50;

// Validation limits, in characters after trimming
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_OWNER_LENGTH: usize = 50;
pub const MAX_NOTES_LENGTH: usize = 1000;
pub const MAX_TAGS_LENGTH: usize = 200;
pub const MAX_PROJECT_NAME_LENGTH: usize = 50;
pub const MAX_ESTIMATED_HOURS: f64 = 1000.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User settings stored as `config.json` in the data directory.
///
/// Missing keys fall back to their defaults, and a missing file reads as
/// [`Config::default`], so the application runs without ever calling
/// `init`. Written by the `init` command.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Project assigned to tasks created without one.
    pub default_project: String,
    pub default_status: TaskStatus,
    pub default_priority: TaskPriority,
    /// Page size for task listings.
    pub batch_size: usize,
    /// Database file; `tasks.db` in the data directory when unset.
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_project: DEFAULT_PROJECT.to_string(),
            default_status: TaskStatus::default(),
            default_priority: TaskPriority::default(),
            batch_size: BATCH_SIZE,
            database_path: None,
        }
    }
}

impl Config {
    /// Reads `config.json` from the data directory, or the defaults if the
    /// file does not exist yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Writes the configuration to the data directory and returns where it went.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)?;
        Ok(config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Resolves the database file location.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(DataStorage::new().get_path(DATABASE_NAME)?),
        }
    }
}
