//! TOML run configuration: analysis settings, input series, output location.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swinglab_core::{AnalysisConfig, AnalysisConfigError};
use thiserror::Error;

/// Unique identifier for a run configuration (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid analysis settings: {0}")]
    Analysis(#[from] AnalysisConfigError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One input series: a symbol label and the CSV it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub symbol: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact root; nothing is written when absent.
    pub dir: Option<PathBuf>,
}

/// Serializable configuration for a batch of analysis runs.
///
/// ```toml
/// [analysis]
/// maxima_order = 10
///
/// [[series]]
/// symbol = "BTCUSDT"
/// path = "data/btcusdt_1h.csv"
///
/// [output]
/// dir = "results"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub output: OutputConfig,
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        for (i, spec) in self.series.iter().enumerate() {
            if spec.symbol.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("series[{i}] has an empty symbol")));
            }
            if let Some(dup) = self.series[..i].iter().find(|s| s.symbol == spec.symbol) {
                return Err(ConfigError::Invalid(format!(
                    "symbol '{}' is listed more than once",
                    dup.symbol
                )));
            }
        }
        Ok(())
    }

    /// Deterministic BLAKE3 hash of the canonical JSON form.
    ///
    /// Two configs with identical settings and inputs share a RunId.
    pub fn run_id(&self) -> Result<RunId, ConfigError> {
        let json = serde_json::to_vec(self)?;
        Ok(blake3::hash(&json).to_hex().to_string())
    }
}
