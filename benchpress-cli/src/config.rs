//! Configuration loading from benchpress.toml
//!
//! Benchpress configuration can be specified in a `benchpress.toml` file in the
//! project root. The configuration is discovered by walking up from the
//! current directory. Command-line flags override anything set here.

use benchpress_core::MeasurementSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "benchpress.toml";

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid duration `{0}`")]
    InvalidDuration(String),
}

/// Benchpress configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchpressConfig {
    /// Measurement defaults
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Which bench files take part in a run
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Minimum measurement time per bench (e.g., "500ms", "1s")
    #[serde(default = "default_time")]
    pub time: String,
    /// Minimum warm-up time per bench
    #[serde(default = "default_warmup_time")]
    pub warmup_time: String,
    /// Minimum measured iterations per bench
    #[serde(default = "default_iterations")]
    pub iterations: u64,
    /// Minimum warm-up iterations per bench
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: u64,
    /// Hard cap on measured iterations
    #[serde(default)]
    pub max_iterations: Option<u64>,
    /// Discard bench stdout/stderr while measuring
    #[serde(default = "default_silence_output")]
    pub silence_output: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            time: default_time(),
            warmup_time: default_warmup_time(),
            iterations: default_iterations(),
            warmup_iterations: default_warmup_iterations(),
            max_iterations: None,
            silence_output: default_silence_output(),
        }
    }
}

fn default_time() -> String {
    "500ms".to_string()
}
fn default_warmup_time() -> String {
    "100ms".to_string()
}
fn default_iterations() -> u64 {
    benchpress_core::DEFAULT_ITERATIONS
}
fn default_warmup_iterations() -> u64 {
    benchpress_core::DEFAULT_WARMUP_ITERATIONS
}
fn default_silence_output() -> bool {
    true
}

/// Discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Glob matched against the source path of each bench file
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
        }
    }
}

fn default_pattern() -> String {
    "**/*".to_string()
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Reporter: "pretty" or "json"
    #[serde(default = "default_reporter")]
    pub reporter: String,
    /// Destination of the JSON report
    #[serde(default)]
    pub json_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reporter: default_reporter(),
            json_path: None,
        }
    }
}

fn default_reporter() -> String {
    "pretty".to_string()
}

impl BenchpressConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Walk up from `start` looking for `benchpress.toml`.
    ///
    /// A file that exists but fails to load is an error, not a miss.
    pub fn discover_from(start: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let mut dir = start.as_ref().to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Discover configuration starting at the current directory
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        match std::env::current_dir() {
            Ok(dir) => Self::discover_from(dir),
            Err(_) => Ok(None),
        }
    }

    /// Run-wide measurement defaults described by `[runner]`
    pub fn measurement_settings(&self) -> Result<MeasurementSettings, ConfigError> {
        Ok(MeasurementSettings {
            time: Self::parse_duration(&self.runner.time)?,
            warmup_time: Self::parse_duration(&self.runner.warmup_time)?,
            iterations: self.runner.iterations,
            warmup_iterations: self.runner.warmup_iterations,
            max_iterations: self.runner.max_iterations,
        })
    }

    /// Parse a duration string (e.g., "3s", "500ms", "2m"); a bare number is seconds
    pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
        let invalid = || ConfigError::InvalidDuration(s.to_string());
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }

        let (num_part, unit_part) = trimmed
            .char_indices()
            .find(|(_, c)| c.is_alphabetic() || *c == 'µ')
            .map(|(i, _)| trimmed.split_at(i))
            .unwrap_or((trimmed, "s"));

        let value: f64 = num_part.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }

        let nanos_per_unit: f64 = match unit_part.trim().to_lowercase().as_str() {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" | "min" => 60e9,
            _ => return Err(invalid()),
        };

        Ok(Duration::from_nanos((value * nanos_per_unit) as u64))
    }
}
