//! # Configuration Management Module
//!
//! Runtime settings for augtags, loaded from a TOML file.
//!
//! ## Configuration Structure
//!
//! - [`CatalogConfig`] - where the item catalog lives
//! - [`AugmentsConfig`] - granted tag namespace, requirement matching, return amounts
//! - [`RejectionWindowConfig`] - how long rejection messages stay up
//! - [`LoggingConfig`] - log level and optional log file
//!
//! Every section is optional and falls back to its defaults.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use augtags::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml")?;
//!     println!("Catalog: {}", config.catalog.path);
//!     println!("Granted prefix: {}", config.augments.granted_tag_prefix);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [catalog]
//! path = "data/items.json"
//!
//! [augments]
//! granted_tag_prefix = "aug_"
//! requirement_matching = "wildcard"
//! default_gain = 1
//!
//! [rejection_window]
//! duration_frames = 180
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::augment::RequirementMatching;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub augments: AugmentsConfig,
    #[serde(default)]
    pub rejection_window: RejectionWindowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON array of item records.
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: "data/items.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentsConfig {
    /// Prepended to every granted tag before it lands on the host.
    #[serde(default = "default_granted_tag_prefix")]
    pub granted_tag_prefix: String,
    /// `wildcard` lets requirements use `*` patterns; `exact` compares whole tags.
    #[serde(default)]
    pub requirement_matching: RequirementMatching,
    /// Units returned to the inventory when an augment leaves a slot.
    #[serde(default = "default_gain")]
    pub default_gain: u32,
}

fn default_granted_tag_prefix() -> String {
    "aug_".to_string()
}

fn default_gain() -> u32 {
    1
}

impl Default for AugmentsConfig {
    fn default() -> Self {
        Self {
            granted_tag_prefix: default_granted_tag_prefix(),
            requirement_matching: RequirementMatching::default(),
            default_gain: default_gain(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionWindowConfig {
    /// Frames before the window closes itself; 0 keeps it open until dismissed.
    pub duration_frames: u32,
}

impl Default for RejectionWindowConfig {
    fn default() -> Self {
        Self {
            duration_frames: 180,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Parse `level`, falling back to `Info` on unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', defaulting to info", self.level);
            log::LevelFilter::Info
        })
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let prefix = &self.augments.granted_tag_prefix;
        if prefix.is_empty() {
            return Err(anyhow!("augments.granted_tag_prefix must not be empty"));
        }
        if prefix.contains('*') || prefix.chars().any(char::is_whitespace) {
            return Err(anyhow!(
                "augments.granted_tag_prefix '{}' may not contain '*' or whitespace",
                prefix
            ));
        }
        if self.augments.default_gain == 0 {
            return Err(anyhow!("augments.default_gain must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog.path, "data/items.json");
        assert_eq!(config.augments.granted_tag_prefix, "aug_");
        assert_eq!(
            config.augments.requirement_matching,
            RequirementMatching::Wildcard
        );
        assert_eq!(config.augments.default_gain, 1);
        assert_eq!(config.rejection_window.duration_frames, 180);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let config: Config =
            toml::from_str("[augments]\nrequirement_matching = \"exact\"\n").unwrap();
        assert_eq!(config.augments.requirement_matching, RequirementMatching::Exact);
        assert_eq!(config.augments.granted_tag_prefix, "aug_");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_prefix_and_gain() {
        let mut config = Config::default();
        config.augments.granted_tag_prefix = "aug *".to_string();
        assert!(config.validate().is_err());

        config.augments.granted_tag_prefix = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.augments.default_gain = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(serialized.contains("granted_tag_prefix = \"aug_\""));
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.augments, AugmentsConfig::default());
    }

    #[test]
    fn test_level_filter_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".to_string(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
        let logging = LoggingConfig {
            level: "debug".to_string(),
            file: None,
        };
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
    }
}
