//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! domain_table: tables/domain.yaml   # relative to this file
//! format: json                       # text | json
//! ```
//!
//! Command-line flags override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::output::OutputFormat;

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Default domain table file.
    #[serde(default)]
    pub domain_table: Option<PathBuf>,
    /// Default output format.
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl CliConfig {
    /// Load a configuration file. Relative paths inside it are resolved
    /// against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: CliConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        if let Some(table) = config.domain_table.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.domain_table = Some(resolve_path(&table, base));
        }
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

/// Settings after merging flags over the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Output format.
    pub format: OutputFormat,
    /// Domain table file, if any source named one.
    pub domain_table: Option<PathBuf>,
}

impl Settings {
    /// Merge command-line values over an optional config file.
    pub fn resolve(config_path: Option<&Path>, format: Option<OutputFormat>) -> Result<Self> {
        let config = match config_path {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        Ok(Self {
            format: format.or(config.format).unwrap_or_default(),
            domain_table: config.domain_table,
        })
    }
}

/// Absolute paths are kept; relative paths are joined onto `base`.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
