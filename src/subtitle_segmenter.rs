use std::fmt::Write as _;
use serde::Serialize;

use crate::transcript::WordTimestamp;

// @module: Frame-accurate caption segmentation

/// A word mapped onto the frame grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameWord {
    /// Word text
    pub text: String,
    /// First frame the word is spoken on
    pub start_frame: i64,
    /// Last frame the word is spoken on
    pub end_frame: i64,
}

impl FrameWord {
    /// Convert a word timestamp to frame indices at the given frame rate.
    ///
    /// Start frames floor and end frames ceil, so a word never loses coverage
    /// to rounding; `start_frame <= end_frame` holds for any valid input.
    pub fn from_word(word: &WordTimestamp, fps: f64) -> Self {
        FrameWord {
            text: word.word.clone(),
            start_frame: (word.start * fps).floor() as i64,
            end_frame: (word.end * fps).ceil() as i64,
        }
    }
}

/// A display chunk of consecutive words sharing one caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleChunk {
    /// Space-joined member word texts
    pub text: String,
    /// First member's start frame
    pub start_frame: i64,
    /// Last member's end frame
    pub end_frame: i64,
}

/// Converts ordered word timestamps into frame words and groups them into
/// readable caption chunks.
///
/// Grouping is greedy left-to-right: a chunk closes when it is full or when
/// the next word starts too long after the previous word ended. The chunks
/// form a contiguous partition of the input.
#[derive(Debug, Clone)]
pub struct SubtitleSegmenter {
    fps: f64,
    max_words_per_chunk: usize,
    max_gap_secs: f64,
}

impl SubtitleSegmenter {
    pub fn new(fps: f64, max_words_per_chunk: usize, max_gap_secs: f64) -> Self {
        SubtitleSegmenter {
            fps,
            max_words_per_chunk,
            max_gap_secs,
        }
    }

    /// Element-wise conversion of word timestamps to frame words.
    ///
    /// Length- and order-preserving. The ordering precondition on the input is
    /// validated at ingestion, not here.
    pub fn frame_words(&self, words: &[WordTimestamp]) -> Vec<FrameWord> {
        words.iter().map(|w| FrameWord::from_word(w, self.fps)).collect()
    }

    /// Group frame words into caption chunks.
    ///
    /// The open chunk is closed and emitted before appending word `i` when it
    /// already holds `max_words_per_chunk` words, or when the gap from the
    /// immediately preceding word in the full sequence (not the last word kept
    /// in a just-closed chunk) exceeds `max_gap_secs * fps` frames. Every input
    /// word ends up in exactly one chunk, in order.
    pub fn group_into_chunks(&self, frame_words: &[FrameWord]) -> Vec<SubtitleChunk> {
        let max_gap_frames = self.max_gap_secs * self.fps;

        let mut chunks = Vec::new();
        let mut current: Vec<&FrameWord> = Vec::new();

        for (i, word) in frame_words.iter().enumerate() {
            let gap_exceeded = i > 0
                && (word.start_frame - frame_words[i - 1].end_frame) as f64 > max_gap_frames;

            if !current.is_empty() && (current.len() >= self.max_words_per_chunk || gap_exceeded) {
                chunks.push(Self::close_chunk(&current));
                current.clear();
            }

            current.push(word);
        }

        if !current.is_empty() {
            chunks.push(Self::close_chunk(&current));
        }

        chunks
    }

    fn close_chunk(words: &[&FrameWord]) -> SubtitleChunk {
        SubtitleChunk {
            text: words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            start_frame: words[0].start_frame,
            end_frame: words[words.len() - 1].end_frame,
        }
    }

    /// Render chunks as SRT-formatted text for preview and debug output
    pub fn chunks_to_srt(&self, chunks: &[SubtitleChunk]) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let _ = writeln!(out, "{}", i + 1);
            let _ = writeln!(
                out,
                "{} --> {}",
                Self::format_frame_timestamp(chunk.start_frame, self.fps),
                Self::format_frame_timestamp(chunk.end_frame, self.fps)
            );
            let _ = writeln!(out, "{}", chunk.text);
            let _ = writeln!(out);
        }
        out
    }

    /// Format a frame index as an SRT timestamp (HH:MM:SS,mmm)
    pub fn format_frame_timestamp(frame: i64, fps: f64) -> String {
        let ms = ((frame.max(0) as f64 / fps) * 1000.0).round() as u64;

        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}
