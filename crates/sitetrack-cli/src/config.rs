//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{ConfigKey, OutputFormat};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SITETRACK_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage file holding the counters
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Default output format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Default environment signals
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

/// Default environment signals used when no flag or env var is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default)]
    pub platform: Option<String>,

    #[serde(default)]
    pub touch: Option<bool>,
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sitetrack")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = self.to_toml()?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Configured default output format, if valid.
    pub fn output_format(&self) -> Option<OutputFormat> {
        match self.format.as_deref()?.to_ascii_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Set a single key from its command-line string form.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::DataFile => self.data_file = Some(PathBuf::from(value)),
            ConfigKey::Format => match value.to_ascii_lowercase().as_str() {
                "text" | "json" => self.format = Some(value.to_ascii_lowercase()),
                _ => bail!("Invalid format '{}'. Expected: text, json", value),
            },
            ConfigKey::NoColor => self.no_color = parse_bool(value)?,
            ConfigKey::UserAgent => self.environment.user_agent = Some(value.to_string()),
            ConfigKey::Platform => self.environment.platform = Some(value.to_string()),
            ConfigKey::Touch => self.environment.touch = Some(parse_bool(value)?),
        }
        Ok(())
    }

    /// Reset a single key to its default.
    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::DataFile => self.data_file = None,
            ConfigKey::Format => self.format = None,
            ConfigKey::NoColor => self.no_color = false,
            ConfigKey::UserAgent => self.environment.user_agent = None,
            ConfigKey::Platform => self.environment.platform = None,
            ConfigKey::Touch => self.environment.touch = None,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("Invalid boolean '{}'. Expected: true, false", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.data_file.is_none());
        assert!(config.format.is_none());
        assert!(!config.no_color);
        assert_eq!(config.environment, EnvironmentConfig::default());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            format = "json"

            [environment]
            platform = "MacIntel"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_format(), Some(OutputFormat::Json));
        assert_eq!(config.environment.platform.as_deref(), Some("MacIntel"));
        assert!(config.environment.user_agent.is_none());
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.set(ConfigKey::DataFile, "/tmp/visits.json").unwrap();
        config.set(ConfigKey::Touch, "yes").unwrap();

        let text = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unknown_format_is_ignored() {
        let config = Config {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(config.output_format().is_none());
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set(ConfigKey::Format, "xml").is_err());
        assert!(config.set(ConfigKey::NoColor, "maybe").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_then_unset() {
        let mut config = Config::default();
        config.set(ConfigKey::UserAgent, "Mozilla/5.0 (X11; Linux x86_64)").unwrap();
        config.set(ConfigKey::NoColor, "on").unwrap();
        assert!(config.no_color);

        config.unset(ConfigKey::UserAgent);
        config.unset(ConfigKey::NoColor);
        assert_eq!(config, Config::default());
    }
}
