use std::collections::HashMap;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::ConfigError;
use crate::overlay_matcher::KeywordEntry;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Timeline frame rate in frames per second
    #[serde(default = "default_fps")]
    pub fps: f64,

    /// Caption segmentation settings
    #[serde(default)]
    pub subtitles: SubtitleConfig,

    /// Overlay detection settings
    #[serde(default)]
    pub overlays: OverlayConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for caption segmentation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Maximum words shown together in one caption chunk
    #[serde(default = "default_max_words_per_chunk")]
    pub max_words_per_chunk: usize,

    /// Silence between words, in seconds, that forces a new chunk
    #[serde(default = "default_max_gap_secs")]
    pub max_gap_secs: f64,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            max_words_per_chunk: default_max_words_per_chunk(),
            max_gap_secs: default_max_gap_secs(),
        }
    }
}

/// Configuration for keyword-triggered image overlays
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OverlayConfig {
    /// How long an overlay stays visible, in seconds
    ///
    /// Converted to frames at the configured fps, so the window scales with
    /// the frame rate rather than assuming 30 fps.
    #[serde(default = "default_display_window_secs")]
    pub display_window_secs: f64,

    /// Ordered keyword dictionary: image path -> trigger phrases
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,

    /// Per-image early trigger, in seconds before the matched word
    #[serde(default)]
    pub early_offsets: HashMap<String, f64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            display_window_secs: default_display_window_secs(),
            keywords: Vec::new(),
            early_offsets: HashMap::new(),
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

fn default_fps() -> f64 {
    30.0
}

fn default_max_words_per_chunk() -> usize {
    3
}

fn default_max_gap_secs() -> f64 {
    0.3
}

fn default_display_window_secs() -> f64 {
    2.0
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }

        if self.subtitles.max_words_per_chunk == 0 {
            return Err(ConfigError::InvalidValue(
                "subtitles.max_words_per_chunk must be at least 1".to_string(),
            ));
        }

        if self.subtitles.max_gap_secs < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "subtitles.max_gap_secs must not be negative, got {}",
                self.subtitles.max_gap_secs
            )));
        }

        if self.overlays.display_window_secs <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "overlays.display_window_secs must be positive, got {}",
                self.overlays.display_window_secs
            )));
        }

        for (image, offset) in &self.overlays.early_offsets {
            if *offset < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "overlays.early_offsets['{}'] must not be negative, got {}",
                    image, offset
                )));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            fps: default_fps(),
            subtitles: SubtitleConfig::default(),
            overlays: OverlayConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
