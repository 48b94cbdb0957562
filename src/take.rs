use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::transcript::{TakeTimestamps, WordTimestamp};

// @module: Take catalog and per-take resolution

/// One contiguous shot (video + audio + script line) in the catalog.
///
/// Optional fields resolve to documented defaults at deserialization: empty
/// image list, zoom disabled, zero playback offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Take {
    /// Take identifier, unique within a catalog
    pub id: u32,

    /// Video clip path, relative to the project assets
    #[serde(rename = "video")]
    pub video_path: String,

    /// Audio clip path, relative to the project assets
    #[serde(rename = "audio")]
    pub audio_path: String,

    /// Script line spoken during the take
    pub transcription: String,

    /// Candidate overlay images, in configured order
    #[serde(default)]
    pub images: Vec<String>,

    /// Whether the renderer should apply the slow zoom treatment
    #[serde(default)]
    pub enable_zoom: bool,

    /// Seconds to skip at the start of the audio clip
    #[serde(default)]
    pub audio_start_from: f64,

    /// Seconds to skip at the start of the video clip
    #[serde(default)]
    pub video_start_from: f64,
}

/// The ordered take catalog plus project-wide settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TakeCatalog {
    /// Takes in timeline order
    pub takes: Vec<Take>,

    /// Optional looping background music track
    #[serde(default)]
    pub background_music: Option<String>,
}

impl TakeCatalog {
    /// Load a take catalog from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read take catalog: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse take catalog: {}", path.display()))
    }

    /// Parse a take catalog from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let catalog: TakeCatalog =
            serde_json::from_str(content).context("Take catalog is not valid JSON")?;
        debug!("Loaded {} take(s) from catalog", catalog.takes.len());
        Ok(catalog)
    }
}

/// A take joined with its timestamp entry, defaults resolved.
///
/// A missing timestamp entry resolves to an empty word list and zero
/// duration, once, here - not scattered across access sites.
#[derive(Debug, Clone)]
pub struct ResolvedTake<'a> {
    /// The catalog record
    pub take: &'a Take,
    /// Take duration on the frame grid, `ceil(duration_secs * fps)`
    pub duration_frames: i64,
    /// Ordered word timestamps, empty when the transcription produced none
    pub words: &'a [WordTimestamp],
}

impl<'a> ResolvedTake<'a> {
    pub fn new(take: &'a Take, stamps: Option<&'a TakeTimestamps>, fps: f64) -> Self {
        let duration_secs = stamps.map_or(0.0, |s| s.duration);
        let words = stamps.map_or(&[][..], |s| s.words.as_slice());

        ResolvedTake {
            take,
            duration_frames: (duration_secs * fps).ceil() as i64,
            words,
        }
    }
}
