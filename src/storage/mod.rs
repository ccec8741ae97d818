pub mod config;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use config::{Config, ConfigStorage, GeneralConfig, LoggingConfig, TomlConfigStorage};

/// Ensure XDG data and config directories exist
/// Returns (data_dir, config_dir)
///
/// XDG Base Directory Specification:
/// - Data: $XDG_DATA_HOME/contacts (default: ~/.local/share/contacts)
/// - Config: $XDG_CONFIG_HOME/contacts (default: ~/.config/contacts)
pub fn ensure_directories() -> Result<(PathBuf, PathBuf)> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    let home_path = PathBuf::from(home);

    let data_dir = env::var("XDG_DATA_HOME")
        .map(|xdg_data| PathBuf::from(xdg_data).join("contacts"))
        .unwrap_or_else(|_| home_path.join(".local/share/contacts"));

    let config_dir = env::var("XDG_CONFIG_HOME")
        .map(|xdg_config| PathBuf::from(xdg_config).join("contacts"))
        .unwrap_or_else(|_| home_path.join(".config/contacts"));

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

    log::debug!("Data directory: {:?}", data_dir);
    log::debug!("Config directory: {:?}", config_dir);

    Ok((data_dir, config_dir))
}
