//! User configuration persisted in the OS config directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::io::StoreError;
use crate::model::ViewMode;

const APP_NAME: &str = "TimeTracker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where projects, tasks and settings are stored.
    pub data_file: PathBuf,
    pub view_mode: ViewMode,
    /// Projects folded on the timeline.
    pub collapsed: HashSet<Uuid>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: data_dir().join("timeline.json"),
            view_mode: ViewMode::default(),
            collapsed: HashSet::new(),
        }
    }
}

impl AppConfig {
    /// Read the config, falling back to defaults when missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Path of `config.json` in the OS config directory.
pub fn config_path() -> PathBuf {
    match directories::ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs.config_dir().join("config.json"),
        None => PathBuf::from("config.json"),
    }
}

/// Directory holding the default data file.
pub fn data_dir() -> PathBuf {
    match directories::ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => PathBuf::from("."),
    }
}
