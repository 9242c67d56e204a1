//! CLI configuration.
//!
//! Settings come from an optional YAML file; command line flags override it.
//!
//! ```yaml
//! format: json
//! strict: true
//! decoder:
//!   delimiter: ","
//! ```

use std::path::Path;

use clap::ValueEnum;
use maxcube_protocol::DecoderOptions;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// How decoded records are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-line human readable summary.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Configuration for a decoder run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Payload splitting options.
    pub decoder: DecoderOptions,
    /// Output format.
    pub format: OutputFormat,
    /// Treat records with diagnostics as failures.
    pub strict: bool,
}

impl CliConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> CliResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(CliConfig::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> CliResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Apply command line flags on top of the file settings.
    ///
    /// Flags that were given replace the file value. `strict` can only be
    /// switched on from the command line.
    pub fn with_overrides(
        mut self,
        format: Option<OutputFormat>,
        delimiter: Option<char>,
        strict: bool,
    ) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        if let Some(delimiter) = delimiter {
            self.decoder.delimiter = delimiter;
        }
        self.strict |= strict;
        self
    }
}
