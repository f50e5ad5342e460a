//! Site configuration management.
//!
//! Handles loading, parsing, and validating the `folio.toml` configuration
//! file, plus CLI overrides.

use crate::cli::Cli;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default values for serde deserialization
mod config_defaults {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "posts".into()
    }
    pub fn extension() -> String {
        "md".into()
    }
}

/// Top-level `folio.toml` structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub content: ContentConfig,
}

/// Where documents live and how they are selected.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory walked on every load.
    pub root: PathBuf,
    /// File extension (without dot) a document must carry.
    pub extension: String,
    /// Preview mode: treat drafts as published on reads.
    pub preview: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: config_defaults::root(),
            extension: config_defaults::extension(),
            preview: false,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Ok(toml::from_str(&raw)?)
    }

    /// Apply CLI overrides on top of the file-backed configuration.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.root {
            self.content.root = root.join(&self.content.root);
        }
        if cli.preview {
            self.content.preview = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.extension.is_empty() {
            return Err(ConfigError::Validation(
                "content.extension must not be empty".into(),
            ));
        }
        if self.content.extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "content.extension is `{}`, drop the leading dot",
                self.content.extension
            )));
        }
        if !self.content.root.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content.root `{}` is not a directory",
                self.content.root.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.content.root, PathBuf::from("posts"));
        assert_eq!(config.content.extension, "md");
        assert!(!config.content.preview);
    }

    #[test]
    fn test_parse_toml() {
        let config: SiteConfig = toml::from_str(
            r#"
            [content]
            root = "articles"
            extension = "txt"
            preview = true
            "#,
        )
        .unwrap();
        assert_eq!(config.content.root, PathBuf::from("articles"));
        assert_eq!(config.content.extension, "txt");
        assert!(config.content.preview);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: SiteConfig = toml::from_str("[content]\nroot = \"articles\"\n").unwrap();
        assert_eq!(config.content.root, PathBuf::from("articles"));
        assert_eq!(config.content.extension, "md");
    }

    #[test]
    fn test_validate_extension() {
        let mut config = SiteConfig::default();
        config.content.extension = ".md".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));

        config.content.extension = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_root_exists() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.content.root = dir.path().join("missing");
        assert!(config.validate().is_err());

        config.content.root = dir.path().to_path_buf();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SiteConfig::from_path(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_, _)));
    }
}
