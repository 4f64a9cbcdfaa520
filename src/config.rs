// AI service configuration
//
// Loaded from ~/.vertical-study/config.toml (or an explicit --config path),
// with environment variables taking precedence for the API key. A missing
// key is not a startup error; it surfaces when a research call is attempted.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables checked for the API key, in precedence order
const API_KEY_ENV_VARS: [&str; 2] = ["VERTICAL_STUDY_API_KEY", "GEMINI_API_KEY"];

/// Configuration for the search-augmented AI service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key for the AI service; absent until configured
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier passed to the generateContent endpoint
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the AI service API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

impl AiConfig {
    /// Default config file path (~/.vertical-study/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".vertical-study").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse; the default path is optional
    /// and silently skipped when absent. Environment variables override the
    /// file's API key.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };

        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    config.api_key = Some(key);
                    break;
                }
            }
        }

        Ok(config)
    }

    /// Load and parse a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: AiConfig = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
api_key = "test-key"
model = "gemini-2.0-pro"
"#,
        )
        .unwrap();

        let config = AiConfig::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.model, "gemini-2.0-pro");
        // Unspecified fields fall back to defaults
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");
        assert!(AiConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_load_from_invalid_toml_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "api_key = [not toml").unwrap();
        assert!(AiConfig::load_from(&path).is_err());
    }
}
