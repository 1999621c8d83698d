//! Per-user application data directory.
//!
//! Holds the task database, its one-time schema backup and `config.json`.

use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const VENDOR_NAME: &str = APP_METADATA_OWNER;
pub const APP_NAME: &str = APP_METADATA_NAME;

/// Overrides the data directory entirely when set.
pub const HOME_ENV: &str = "SOULPLANNER_HOME";

/// Per-user directory holding the config file and the default database.
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    /// Resolves `%LOCALAPPDATA%` on Windows, `~/Library/Application Support`
    /// on macOS and `~/.local/share` elsewhere, then appends `<owner>/<app>`.
    pub fn new() -> Self {
        if let Ok(home) = var(HOME_ENV) {
            return Self::at(home);
        }
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").or_else(|_| var("USERPROFILE")).unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        Self::at(Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME))
    }

    /// Uses `base_path` as the data directory as is.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    /// Path of `file_name` inside the data directory, creating the directory
    /// on first use.
    pub fn get_path(&self, file_name: &str) -> io::Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
