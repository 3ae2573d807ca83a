//! Configuration parsing and management.

use crate::corpus::{AssetKind, ExtensionPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Configuration matching the optional linkweave.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub extensions: ExtensionsConfig,

    /// Copy allow-listed image assets into the output tree
    #[serde(default = "default_true")]
    pub copy_assets: bool,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            extensions: ExtensionsConfig::default(),
            copy_assets: true,
            markdown: MarkdownConfig::default(),
            config_path: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub template: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    #[serde(default = "default_note_extensions")]
    pub notes: Vec<String>,

    #[serde(default = "default_image_extensions")]
    pub images: Vec<String>,
}

fn default_note_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif", "svg", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            notes: default_note_extensions(),
            images: default_image_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Open absolute links in a new tab
    #[serde(default = "default_true")]
    pub href_target_blank: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            href_target_blank: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Source directory, resolved relative to the config file
    pub fn source_dir(&self) -> Option<PathBuf> {
        self.paths.source.as_ref().map(|p| self.resolve_path(p))
    }

    /// Output directory, resolved relative to the config file
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.paths.output.as_ref().map(|p| self.resolve_path(p))
    }

    /// Page template, resolved relative to the config file
    pub fn template_path(&self) -> Option<PathBuf> {
        self.paths.template.as_ref().map(|p| self.resolve_path(p))
    }

    /// Extension allow-list for the corpus loader
    pub fn extension_policy(&self) -> ExtensionPolicy {
        let mut policy = ExtensionPolicy::empty();
        for ext in &self.extensions.images {
            policy.allow(ext, AssetKind::Image);
        }
        // Notes registered last so they win if an extension is listed twice
        for ext in &self.extensions.notes {
            policy.allow(ext, AssetKind::Note);
        }
        policy
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_deref().and_then(Path::parent) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
