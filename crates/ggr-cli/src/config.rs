//! Configuration file handling for ggr-cli

use anyhow::{Context, Result};
use ggr_client::ConfigOverrides;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the CLI tool
///
/// ```toml
/// [nexusggr]
/// agent = "my-agent"
/// token = "secret"
/// endpoint = "https://api.nexusggr.example/"
///
/// [telo]
/// agent = "my-agent"
/// token = "secret"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Nexusggr credentials
    #[serde(default)]
    pub nexusggr: ConfigOverrides,
    /// Telo credentials
    #[serde(default)]
    pub telo: ConfigOverrides,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("ggr-cli");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[nexusggr]
agent = "agent-file"
token = "token-file"
endpoint = "http://vendor.test/api"

[telo]
agent = "telo-agent"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(
            config.nexusggr,
            ConfigOverrides {
                agent: Some("agent-file".to_string()),
                token: Some("token-file".to_string()),
                endpoint: Some("http://vendor.test/api".to_string()),
            }
        );
        assert_eq!(config.telo.agent.as_deref(), Some("telo-agent"));
        assert_eq!(config.telo.endpoint, None);
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(Config::load_from(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[nexusggr\nagent = ").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(&dir.path().join("absent.toml")).is_err());
    }
}
