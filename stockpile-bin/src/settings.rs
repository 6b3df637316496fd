use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};
use stockpile_inventory::Config;
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "stockpile.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Where inventories are saved.
    pub store_directory: PathBuf,
    pub inventory: Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_directory: PathBuf::from("inventories"),
            inventory: Config::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Settings>(&contents) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    Settings::default()
                }
            },
            Err(err) => {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
                Settings::default()
            }
        }
    }
}
