use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Bundled default configuration, written on first run
const EXAMPLE_CONFIG: &str = include_str!("../../contacts.toml.example");

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Format the contact book is stored in ("json" or "binary")
    #[serde(default = "default_format")]
    pub default_format: String,

    /// View used by `show` when none is given ("table" or "list")
    #[serde(default = "default_view")]
    pub default_view: String,

    /// Contact book location; defaults to contacts.<ext> in the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_file: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            default_format: default_format(),
            default_view: default_view(),
            book_file: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write a rotating log file in the data directory
    #[serde(default)]
    pub file: bool,

    #[serde(default = "default_file_level")]
    pub file_level: String,

    /// Minimum level echoed to stderr when file logging is on
    #[serde(default = "default_console_level")]
    pub console_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: false,
            file_level: default_file_level(),
            console_level: default_console_level(),
        }
    }
}

// Default value functions for serde
fn default_format() -> String {
    "json".to_string()
}

fn default_view() -> String {
    "table".to_string()
}

fn default_file_level() -> String {
    "info".to_string()
}

fn default_console_level() -> String {
    "warn".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Save configuration to file
    fn save(&self, config: &Config) -> Result<()>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: format={}, view={}, book={:?}",
            config.general.default_format,
            config.general.default_view,
            config.general.book_file
        );

        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        let toml_str = toml::to_string_pretty(config)
            .with_context(|| "Failed to serialize configuration")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, toml_str)
            .with_context(|| format!("Failed to write config to {:?}", self.path))?;

        log::debug!("Saved configuration to {:?}", self.path);

        Ok(())
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.general.default_format, "json");
        assert_eq!(config.general.default_view, "table");
        assert_eq!(config.general.book_file, None);
        assert!(!config.logging.file);
        assert_eq!(config.logging.file_level, "info");
        assert_eq!(config.logging.console_level, "warn");
    }

    #[test]
    fn test_example_config_parses_to_defaults() {
        let config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.general.default_format, "json");
        assert_eq!(config.general.default_view, "table");
        assert!(!config.logging.file);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
        [general]
        default_format = "binary"
        book_file = "/tmp/book.bin"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_format, "binary");
        assert_eq!(config.general.default_view, "table");
        assert_eq!(
            config.general.book_file,
            Some(PathBuf::from("/tmp/book.bin"))
        );
    }

    #[test]
    fn test_load_missing_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TomlConfigStorage::new(dir.path().join("contacts.toml"));

        let config = storage.load().unwrap();

        assert!(storage.path().exists());
        assert_eq!(config.general.default_view, "table");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TomlConfigStorage::new(dir.path().join("nested").join("contacts.toml"));
        let mut config = Config::default();
        config.general.default_view = "list".to_string();
        config.logging.file = true;

        storage.save(&config).unwrap();
        let loaded = storage.load().unwrap();

        assert_eq!(loaded.general.default_view, "list");
        assert!(loaded.logging.file);
    }
}
