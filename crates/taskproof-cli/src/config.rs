//! CLI configuration.
//!
//! Layered, lowest precedence first: built-in defaults, an optional YAML
//! file (`--config`), environment variables, then command-line flags.
//!
//! Variables:
//! - `TASKPROOF_MERKLE_ONLY` (`1`/`true`/`yes` or `0`/`false`/`no`)
//! - `TASKPROOF_FORMAT` (`text` or `json`)

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per artifact plus indented caveats.
    #[default]
    Text,
    /// The full batch report as pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidEnv {
                var: "TASKPROOF_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

/// Which files `verify --all` picks up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DiscoveryConfig {
    /// Substring the file name must contain.
    pub contains: String,
    /// Required extension, without the dot. Compared case-insensitively.
    pub extension: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            contains: "proof".to_string(),
            extension: "json".to_string(),
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CliConfig {
    /// Skip signature checks.
    pub merkle_only: bool,
    /// Report format.
    pub format: OutputFormat,
    /// Artifact discovery rule.
    pub discovery: DiscoveryConfig,
}

impl CliConfig {
    /// Load from `path` if given, else defaults, then apply the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|var| std::env::var(var).ok())
    }

    /// Parse a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Apply environment overrides read through `lookup`.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup("TASKPROOF_MERKLE_ONLY") {
            self.merkle_only = parse_flag("TASKPROOF_MERKLE_ONLY", &raw)?;
        }
        if let Some(raw) = lookup("TASKPROOF_FORMAT") {
            self.format = raw.parse()?;
        }
        Ok(self)
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
