use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Migra configuration.
///
/// `[peaks]` and `[changepoints]` have no defaults: their thresholds depend
/// on the species and sampling rate and are chosen by inspecting the bands
/// written by `migra decompose`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigraConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Decomposition settings.
    #[serde(default)]
    pub wavelet: WaveletToml,

    /// Peak-extent branch settings.
    pub peaks: PeaksToml,

    /// Change-point branch settings.
    pub changepoints: ChangePointsToml,

    /// Optional comparison against an annotated column.
    #[serde(default)]
    pub compare: Option<CompareToml>,
}

/// Reads and parses a configuration file.
pub fn load(path: &Path) -> Result<MigraConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    #[serde(default)]
    pub timestamp_column: Option<String>,
    #[serde(default)]
    pub x_column: Option<String>,
    #[serde(default)]
    pub y_column: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: default_output_dir(),
            value_column: default_value_column(),
            timestamp_column: None,
            x_column: None,
            y_column: None,
            delimiter: default_delimiter(),
        }
    }
}

impl IoToml {
    /// The CLI override if given, otherwise `[io].input`.
    pub fn resolve_input(&self, cli: Option<PathBuf>) -> Result<PathBuf> {
        cli.or_else(|| self.input.clone()).ok_or_else(|| {
            anyhow::anyhow!("no input path: set [io].input in config or use --input")
        })
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("migra-out")
}
fn default_value_column() -> String {
    "speed".to_string()
}
fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveletToml {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_levels")]
    pub levels: usize,
}

impl Default for WaveletToml {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            levels: default_levels(),
        }
    }
}

fn default_filter() -> String {
    "haar".to_string()
}
fn default_levels() -> usize {
    6
}

/// Negative `min_distance` or `max_count` fail to deserialize into `usize`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeaksToml {
    pub level: usize,
    pub min_height: f64,
    #[serde(default = "default_min_distance")]
    pub min_distance: usize,
    #[serde(default)]
    pub max_count: Option<usize>,
}

fn default_min_distance() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangePointsToml {
    pub level: usize,
    pub threshold: f64,
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length: usize,
}

fn default_min_segment_length() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompareToml {
    /// Annotated CSV; defaults to the input track.
    #[serde(default)]
    pub reference: Option<PathBuf>,
    pub column: String,
    #[serde(default)]
    pub tolerance: usize,
}
