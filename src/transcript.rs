use std::collections::HashMap;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::TranscriptError;

// @module: Word-level speech timestamp ingestion

/// A single word with its speech-recognition timing, in seconds.
///
/// Supplied externally per take as an ordered sequence with non-decreasing,
/// non-negative start times. Immutable input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    /// Word text as recognized
    pub word: String,
    /// Start of the word in seconds
    pub start: f64,
    /// End of the word in seconds
    pub end: f64,
}

/// Timestamp entry for one take, as produced by the transcription step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TakeTimestamps {
    /// Take identifier this entry belongs to
    pub take: u32,

    /// Spoken duration of the take in seconds
    #[serde(default)]
    pub duration: f64,

    /// Full transcript text of the take
    #[serde(default)]
    pub text: String,

    /// Ordered word-level timestamps
    #[serde(default)]
    pub words: Vec<WordTimestamp>,
}

/// Validate the ordering precondition on a word timestamp sequence.
///
/// Checks non-negative start times, end >= start per word, and non-decreasing
/// start times across the sequence. Violations fail here at ingestion instead
/// of surfacing later as inverted subtitle ranges.
pub fn validate_words(words: &[WordTimestamp]) -> Result<(), TranscriptError> {
    for (index, word) in words.iter().enumerate() {
        if word.start < 0.0 {
            return Err(TranscriptError::NegativeStart {
                index,
                word: word.word.clone(),
                start: word.start,
            });
        }
        if word.end < word.start {
            return Err(TranscriptError::InvertedRange {
                index,
                word: word.word.clone(),
                start: word.start,
                end: word.end,
            });
        }
        if index > 0 {
            let prev_start = words[index - 1].start;
            if word.start < prev_start {
                return Err(TranscriptError::InputOrdering {
                    index,
                    word: word.word.clone(),
                    start: word.start,
                    prev_start,
                });
            }
        }
    }
    Ok(())
}

/// Catalog of per-take timestamp entries loaded from the transcription output.
///
/// The on-disk format is a JSON object keyed by an arbitrary per-take label;
/// entries are indexed here by their `take` field, so key naming schemes from
/// different transcription runs all resolve the same way.
#[derive(Debug, Default)]
pub struct TimestampCatalog {
    entries: HashMap<u32, TakeTimestamps>,
}

impl TimestampCatalog {
    /// Create an empty catalog, used when no timestamp file is available
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and validate a timestamp catalog from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read timestamp file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse timestamp file: {}", path.display()))
    }

    /// Parse and validate a timestamp catalog from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, TakeTimestamps> =
            serde_json::from_str(content).context("Timestamp catalog is not valid JSON")?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, stamps) in raw {
            validate_words(&stamps.words)
                .with_context(|| format!("Invalid word timestamps for take {} ('{}')", stamps.take, key))?;

            if stamps.duration < 0.0 {
                anyhow::bail!("Negative duration {}s for take {} ('{}')", stamps.duration, stamps.take, key);
            }

            if let Some(previous) = entries.insert(stamps.take, stamps) {
                warn!("Duplicate timestamp entry for take {}, keeping the later one", previous.take);
            }
        }

        debug!("Loaded timestamp entries for {} take(s)", entries.len());
        Ok(Self { entries })
    }

    /// Look up the timestamp entry for a take, if the transcription produced one
    pub fn for_take(&self, take_id: u32) -> Option<&TakeTimestamps> {
        self.entries.get(&take_id)
    }

    /// Number of takes with timestamp entries - used by tests and external consumers
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries at all
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
