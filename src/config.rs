//! Optional per-directory defaults from `skinpack.toml`.
//!
//! ```toml
//! [pack]
//! name = "Demo"
//! version = "2.1.0"
//! ```
//!
//! Values given on the command line win; anything still missing is prompted
//! for interactively.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "skinpack.toml";

/// Parsed `skinpack.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackFileConfig {
    #[serde(default)]
    pub pack: PackSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackSection {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Name and version as far as they are known before prompting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRequest {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PackFileConfig {
    /// Fill fields missing from `cli` with values from this file.
    pub fn merge(&self, cli: PartialRequest) -> PartialRequest {
        PartialRequest {
            name: cli.name.or_else(|| non_blank(&self.pack.name)),
            version: cli.version.or_else(|| non_blank(&self.pack.version)),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Load `skinpack.toml` from `dir`, if present.
pub fn load_pack_config(dir: &Path) -> Result<Option<PackFileConfig>> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.is_file() {
        return Ok(None);
    }
    let config_text = fs::read_to_string(&config_path)
        .with_context(|| format!("reading pack config '{}'", config_path.display()))?;
    let parsed: PackFileConfig = toml::from_str(&config_text)
        .with_context(|| format!("parsing pack config '{}'", config_path.display()))?;
    tracing::info!("loaded pack config: {}", config_path.display());
    Ok(Some(parsed))
}
