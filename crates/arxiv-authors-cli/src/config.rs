//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for arxiv-authors
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Author-list column to read
    pub column: String,
    pub skip_invalid: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            column: arxiv_authors_core::AUTHORS_PARSED.to_string(),
            skip_invalid: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_dir: PathBuf,
    pub compression_level: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("./data"),
            compression_level: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows in the top-authors table
    pub top: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top: 20 }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./arxiv-authors.toml (current directory)
    /// 2. ~/.config/arxiv-authors/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("arxiv-authors.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "arxiv-authors") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.input.column, "authors_parsed");
        assert!(!config.input.skip_invalid);
        assert_eq!(config.output.default_dir, PathBuf::from("./data"));
        assert_eq!(config.output.compression_level, 3);
        assert_eq!(config.report.top, 20);
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[input]
column = "authors"
skip_invalid = true

[output]
default_dir = "/tmp/authors"

[report]
top = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.column, "authors");
        assert!(config.input.skip_invalid);
        assert_eq!(config.output.default_dir, PathBuf::from("/tmp/authors"));
        assert_eq!(config.output.compression_level, 3);
        assert_eq!(config.report.top, 5);
    }

    #[test]
    fn from_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::from_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn from_file_reads_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\ntop = 3\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().report.top, 3);
    }
}
