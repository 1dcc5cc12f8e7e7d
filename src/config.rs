use crate::anim::EntranceFrom;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "config.json";

/// Errors raised while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NoHomeDirectory => {
                "Could not locate a configuration directory".to_string()
            }
            ConfigError::Io(e) => format!("Could not read the configuration file: {}", e),
            ConfigError::Json(e) => format!("Invalid configuration file: {}", e),
        }
    }
}

/// Screen shown at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartScreen {
    #[default]
    Home,
    Saved,
}

/// User configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset file replacing the bundled catalogue
    pub data_path: Option<PathBuf>,
    pub start_screen: StartScreen,
    /// Event poll timeout, which is also the animation frame interval
    pub tick_rate_ms: u64,
    pub item_stagger_ms: u64,
    pub outfit_stagger_ms: u64,
    /// Direction cards enter from when mounted
    pub entrance_from: EntranceFrom,
    /// Keep bookmark flags across remounts for the rest of the session
    pub persist_bookmarks: bool,
    /// Match chip keywords against whole words of outfit tags
    pub strict_chip_matching: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            start_screen: StartScreen::Home,
            tick_rate_ms: 33,
            item_stagger_ms: 50,
            outfit_stagger_ms: 100,
            entrance_from: EntranceFrom::Bottom,
            persist_bookmarks: false,
            strict_chip_matching: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Location of the configuration file in the platform config directory.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location; a missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn item_stagger(&self) -> Duration {
        Duration::from_millis(self.item_stagger_ms)
    }

    pub fn outfit_stagger(&self) -> Duration {
        Duration::from_millis(self.outfit_stagger_ms)
    }
}

pub fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("com", "wardrobe", "wardrobe-explorer")
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.start_screen, StartScreen::Home);
        assert_eq!(config.tick_rate(), Duration::from_millis(33));
        assert_eq!(config.item_stagger(), Duration::from_millis(50));
        assert_eq!(config.outfit_stagger(), Duration::from_millis(100));
        assert!(!config.persist_bookmarks);
        assert!(!config.strict_chip_matching);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"start_screen": "saved", "persist_bookmarks": true, "entrance_from": "left"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.start_screen, StartScreen::Saved);
        assert_eq!(config.entrance_from, EntranceFrom::Left);
        assert!(config.persist_bookmarks);
        assert_eq!(config.tick_rate_ms, 33);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let config = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"start_screen": "attic"}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.user_message().contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
