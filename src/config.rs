//! Scan configuration.
//!
//! A configuration file is optional. Every field falls back to the
//! built-in defaults, so an empty file is valid:
//!
//! ```yaml
//! ignored_dirs: [bonus, test]
//! extensions: [c]
//! excluded_keywords: [if, while, for, switch, else, return]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scan::{
    KeywordFilter, TreeScanner, DEFAULT_EXCLUDED_KEYWORDS, DEFAULT_EXTENSIONS,
    DEFAULT_IGNORED_DIRS,
};

/// Config file names looked up in the scan root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["callmap.yaml", ".callmap.yaml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory names skipped at every depth
    pub ignored_dirs: Vec<String>,
    /// Source file extensions, with or without the leading dot
    pub extensions: Vec<String>,
    /// Names never reported as declarations or calls
    pub excluded_keywords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignored_dirs: to_strings(DEFAULT_IGNORED_DIRS),
            extensions: to_strings(DEFAULT_EXTENSIONS),
            excluded_keywords: to_strings(DEFAULT_EXCLUDED_KEYWORDS),
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Look for a config file in `root`.
    pub fn discover<P: AsRef<Path>>(root: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| root.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Add directory names to skip, keeping the configured ones.
    pub fn with_ignored_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.ignored_dirs.contains(&name) {
                self.ignored_dirs.push(name);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "extensions must list at least one suffix".to_string(),
            ));
        }
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::Invalid(format!("empty extension {:?}", ext)));
        }
        if let Some(dir) = self
            .ignored_dirs
            .iter()
            .find(|d| d.is_empty() || d.contains(['/', '\\']))
        {
            return Err(ConfigError::Invalid(format!(
                "ignored_dirs entries are directory names, got {:?}",
                dir
            )));
        }
        Ok(())
    }

    pub fn tree_scanner(&self) -> TreeScanner {
        TreeScanner::new(self.ignored_dirs.clone(), self.extensions.clone())
    }

    pub fn keyword_filter(&self) -> KeywordFilter {
        KeywordFilter::new(self.excluded_keywords.iter().cloned())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
