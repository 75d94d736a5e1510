use crate::domain::TaskStatus;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides the config directory
pub const DIR_ENV: &str = "TASKBOARD_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unknown tab \"{0}\" (expected todo, completed or overdue)")]
    UnknownTab(String),
}

/// Settings read from config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Event poll / tick interval
    pub tick_ms: u64,
    /// Length of the slide-out after a task is checked off
    pub slide_out_ms: u64,
    /// Simulated generation delay
    pub generation_delay_ms: u64,
    /// Tab shown at startup
    pub default_tab: String,
    pub use_emoji: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            slide_out_ms: 300,
            generation_delay_ms: 2000,
            default_tab: String::from("todo"),
            use_emoji: true,
        }
    }
}

impl AppConfig {
    pub fn slide_out(&self) -> Duration {
        Duration::from_millis(self.slide_out_ms)
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn default_status(&self) -> Result<TaskStatus, ConfigError> {
        TaskStatus::from_tag(&self.default_tab)
            .ok_or_else(|| ConfigError::UnknownTab(self.default_tab.clone()))
    }
}

/// Get the config directory - $TASKBOARD_DIR if set, else ~/.taskboard
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".taskboard"))
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Path of the default config file
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Path of the log file
pub fn log_file() -> Result<PathBuf> {
    Ok(ensure_config_dir()?.join("taskboard.log"))
}

/// Load config from a JSON file; a missing file yields the defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    config.default_status()?;
    Ok(config)
}

/// Write the default config to `path`; refuses to overwrite an existing file
pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Config already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(&AppConfig::default())?;
    fs::write(path, json).with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.generation_delay(), Duration::from_millis(2000));
        assert_eq!(config.default_status().unwrap(), TaskStatus::Todo);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "slide_out_ms": 0, "default_tab": "overdue" }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.slide_out(), Duration::ZERO);
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.default_status().unwrap(), TaskStatus::Overdue);
    }

    #[test]
    fn test_unknown_tab_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "default_tab": "someday" }"#).unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTab(ref tab) if tab == "someday"));
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn test_malformed_config_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ tick_ms: ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_unreadable_config_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        // A directory exists but cannot be read as a file
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_write_default_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        write_default_config(&path).unwrap();
        assert_eq!(load_config(&path).unwrap(), AppConfig::default());

        // Second write refuses to clobber
        assert!(write_default_config(&path).is_err());
    }
}
