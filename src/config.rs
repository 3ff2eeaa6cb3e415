//! Application configuration persisted as YAML.

use serde::{Deserialize, Serialize};

use crate::ui::colors::Theme;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 30;

/// User-editable settings: color theme and GitHub API parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub theme: String,
    pub api_url: String,
    pub per_page: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Blue.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Loads and persists the config file, writing defaults when the file does
/// not exist or fails to parse.
pub struct ConfigManager {
    path: String,
    config: Config,
}

impl ConfigManager {
    pub fn new(path: &str) -> Self {
        match std::fs::File::open(path) {
            Ok(file) => {
                let config = match serde_yaml::from_reader(file) {
                    Ok(c) => c,
                    Err(e) => {
                        log::warn!("failed to parse config file, using defaults: {e}");
                        Config::default()
                    }
                };
                Self {
                    path: String::from(path),
                    config,
                }
            }
            Err(_) => {
                let mut manager = Self {
                    path: String::from(path),
                    config: Config::default(),
                };
                manager.write();
                manager
            }
        }
    }

    pub fn get(&self) -> Config {
        self.config.clone()
    }

    pub fn update(&mut self, config: Config) {
        self.config = config;
        self.write();
    }

    fn write(&mut self) {
        match serde_yaml::to_string(&self.config) {
            Ok(serialized) => {
                if let Err(e) = std::fs::write(&self.path, serialized) {
                    log::warn!("failed to write config file: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize config: {e}"),
        }
    }
}
