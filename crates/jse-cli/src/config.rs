//! # Configuration File
//!
//! Optional YAML file named by `--config`:
//!
//! ```yaml
//! schema: assets/service.schema.json
//! repair: true
//! compact: false
//! ```
//!
//! Every key is optional. Command-line flags win over the file, and the
//! file wins over built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Schema file used when `--schema` is not given.
    pub schema: Option<PathBuf>,
    /// Apply heuristic repair to malformed input.
    pub repair: bool,
    /// Print completed documents on a single line.
    pub compact: bool,
}

impl Config {
    /// Read the config file, or return the defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_yaml(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file deserializes to YAML null, not an empty mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
