use std::collections::{HashMap, HashSet};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::subtitle_segmenter::FrameWord;
use crate::text_normalizer::normalize;

// @module: Keyword-triggered image overlay detection

/// Keyword phrases configured for one overlay image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordEntry {
    /// Overlay image path
    pub image: String,
    /// Ordered trigger phrases; each phrase is one or more whitespace-separated tokens
    pub keywords: Vec<String>,
}

/// Ordered mapping from overlay image to its trigger phrases.
///
/// The entry order is part of the contract: deduplication tie-breaks follow
/// it, so the dictionary is an explicit list rather than an associative map
/// with unspecified iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordDictionary {
    pub entries: Vec<KeywordEntry>,
}

impl KeywordDictionary {
    pub fn new(entries: Vec<KeywordEntry>) -> Self {
        KeywordDictionary { entries }
    }

    /// Trigger phrases for an image; images absent from the dictionary get none
    pub fn keywords_for(&self, image: &str) -> &[String] {
        self.entries
            .iter()
            .find(|e| e.image == image)
            .map_or(&[][..], |e| e.keywords.as_slice())
    }
}

/// A resolved overlay placement, ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayCue {
    /// Overlay image path
    pub image_path: String,
    /// First frame the overlay is visible on
    pub start_frame: i64,
    /// Frame the overlay disappears on
    pub end_frame: i64,
    /// The phrase that triggered the overlay
    pub keyword: String,
}

/// Matches configured keyword phrases against a take's transcript and places
/// time-bounded image overlays.
///
/// With word-level timing available, phrases are matched token-by-token
/// against the frame words (precise mode); otherwise overlay timing is
/// interpolated proportionally over the transcript word count (fallback
/// mode). Both modes keep at most one cue per image.
#[derive(Debug, Clone)]
pub struct OverlayMatcher {
    dictionary: KeywordDictionary,
    /// Per-image early trigger, already converted to frames
    offsets: HashMap<String, i64>,
    /// How long an overlay stays visible, already converted to frames
    display_window_frames: i64,
}

impl OverlayMatcher {
    /// Build a matcher with fps-relative timing resolved to frames.
    ///
    /// `display_window_secs` and the per-image `early_offsets` are given in
    /// seconds and converted here, so the overlay window scales with the
    /// configured frame rate instead of assuming 30 fps.
    pub fn new(
        fps: f64,
        dictionary: KeywordDictionary,
        early_offsets: &HashMap<String, f64>,
        display_window_secs: f64,
    ) -> Self {
        let offsets = early_offsets
            .iter()
            .map(|(image, secs)| (image.clone(), (secs * fps).round() as i64))
            .collect();

        OverlayMatcher {
            dictionary,
            offsets,
            display_window_frames: (display_window_secs * fps).round() as i64,
        }
    }

    /// Detect overlay cues for one take.
    ///
    /// Candidate images are scanned in their given order, phrases in
    /// dictionary order, hits in scan order; the first candidate per image
    /// wins. Missing matches, an empty transcript, or images without
    /// dictionary entries contribute zero candidates.
    pub fn detect(
        &self,
        transcript: &str,
        duration_frames: i64,
        images: &[String],
        frame_words: Option<&[FrameWord]>,
    ) -> Vec<OverlayCue> {
        let candidates = match frame_words {
            Some(words) if !words.is_empty() => {
                self.precise_cues(duration_frames, images, words)
            }
            _ => self.fallback_cues(transcript, duration_frames, images),
        };

        let cues = Self::dedup_by_image(candidates);
        debug!("Detected {} overlay cue(s) across {} candidate image(s)", cues.len(), images.len());
        cues
    }

    fn offset_frames(&self, image: &str) -> i64 {
        self.offsets.get(image).copied().unwrap_or(0)
    }

    /// Precise mode: slide each phrase's token window across the frame words.
    ///
    /// A window hits when every transcript word contains the corresponding
    /// keyword token as a substring. Containment is one-directional: the
    /// transcript word may be longer than the token, never the reverse.
    fn precise_cues(
        &self,
        duration_frames: i64,
        images: &[String],
        frame_words: &[FrameWord],
    ) -> Vec<OverlayCue> {
        let normalized_words: Vec<String> = frame_words
            .iter()
            .map(|w| normalize(&w.text, true))
            .collect();

        let mut candidates = Vec::new();

        for image in images {
            let offset = self.offset_frames(image);

            for keyword in self.dictionary.keywords_for(image) {
                let tokens: Vec<String> = keyword
                    .split_whitespace()
                    .map(|t| normalize(t, false))
                    .collect();

                if tokens.is_empty() || tokens.len() > frame_words.len() {
                    continue;
                }

                for start in 0..=(frame_words.len() - tokens.len()) {
                    let hit = tokens
                        .iter()
                        .enumerate()
                        .all(|(j, token)| normalized_words[start + j].contains(token.as_str()));

                    if hit {
                        let anchor = frame_words[start].start_frame;
                        trace!("'{}' hit at word {} (frame {}) for {}", keyword, start, anchor, image);

                        candidates.push(OverlayCue {
                            image_path: image.clone(),
                            start_frame: (anchor - offset).max(0),
                            end_frame: (anchor + self.display_window_frames).min(duration_frames),
                            keyword: keyword.clone(),
                        });
                    }
                }
            }
        }

        candidates
    }

    /// Fallback mode: interpolate overlay timing proportionally over the
    /// transcript word count when no word-level timing exists.
    fn fallback_cues(
        &self,
        transcript: &str,
        duration_frames: i64,
        images: &[String],
    ) -> Vec<OverlayCue> {
        let total_words = transcript.split_whitespace().count();
        if total_words == 0 {
            return Vec::new();
        }

        let frames_per_word = duration_frames as f64 / total_words as f64;
        let transcript_lower = transcript.to_lowercase();

        let mut candidates = Vec::new();

        for image in images {
            let offset = self.offset_frames(image);

            for keyword in self.dictionary.keywords_for(image) {
                let keyword_lower = keyword.to_lowercase();
                if keyword_lower.is_empty() {
                    continue;
                }

                if let Some(position) = transcript_lower.find(&keyword_lower) {
                    // Words fully preceding the match approximate its word index
                    let words_before = transcript_lower[..position].split_whitespace().count();
                    let phrase_tokens = keyword.split_whitespace().count();

                    let start_frame = (words_before as f64 * frames_per_word).floor() as i64;
                    // 2x the phrase length is a heuristic display buffer
                    let end_frame = ((words_before + 2 * phrase_tokens) as f64 * frames_per_word)
                        .floor() as i64;

                    trace!("'{}' found at word {} for {}", keyword, words_before, image);

                    candidates.push(OverlayCue {
                        image_path: image.clone(),
                        start_frame: (start_frame - offset).max(0),
                        end_frame: end_frame.min(duration_frames),
                        keyword: keyword.clone(),
                    });
                }
            }
        }

        candidates
    }

    /// Keep only the first candidate per distinct image, in generation order
    fn dedup_by_image(candidates: Vec<OverlayCue>) -> Vec<OverlayCue> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|cue| seen.insert(cue.image_path.clone()))
            .collect()
    }
}
