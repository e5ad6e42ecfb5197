use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::merger::MergeConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Strip markup from the merged output by default
    #[serde(default)]
    pub plain_text: bool,

    /// Merge config
    #[serde(default)]
    pub merge: MergeSettings,

    /// Output config
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Merge engine and worker settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MergeSettings {
    // @field: Run the jump pass
    #[serde(default = "default_true")]
    pub fix_jumps: bool,

    // @field: Allow the single-cursor lookup for ordered tracks
    #[serde(default = "default_true")]
    pub use_consequential_fast_path: bool,

    // @field: Cancel the merge after this many seconds, 0 for no deadline
    #[serde(default)]
    pub timeout_secs: u64,

    // @field: Show a spinner while merging
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            fix_jumps: true,
            use_consequential_fast_path: true,
            timeout_secs: 0,
            show_progress: true,
        }
    }
}

impl MergeSettings {
    /// Engine configuration derived from these settings
    pub fn engine_config(&self) -> MergeConfig {
        MergeConfig {
            fix_jumps: self.fix_jumps,
            use_consequential_fast_path: self.use_consequential_fast_path,
        }
    }
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Suffix inserted before `.srt` when deriving the output file name
    #[serde(default = "default_output_suffix")]
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_output_suffix(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output_suffix() -> String {
    "merged".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let suffix = &self.output.suffix;
        if suffix.trim().is_empty() {
            return Err(anyhow!("Output suffix must not be empty"));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(anyhow!("Output suffix must not contain a path separator: {}", suffix));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            plain_text: false,
            merge: MergeSettings::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
