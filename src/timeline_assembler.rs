use log::debug;
use serde::Serialize;

use crate::app_config::Config;
use crate::overlay_matcher::{KeywordDictionary, OverlayCue, OverlayMatcher};
use crate::subtitle_segmenter::{SubtitleChunk, SubtitleSegmenter};
use crate::take::{ResolvedTake, Take, TakeCatalog};
use crate::transcript::TimestampCatalog;

// @module: Per-take orchestration and timeline sequencing

/// Declarative scene description for one take, consumed by the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TakePlan {
    /// Take identifier
    pub take_id: u32,
    /// Absolute timeline frame the take starts on
    pub from_frame: i64,
    /// Take length on the frame grid
    pub duration_frames: i64,
    /// Video clip path
    pub video: String,
    /// Audio clip path
    pub audio: String,
    /// Frames to skip at the start of the video clip
    pub video_start_frame: i64,
    /// Frames to skip at the start of the audio clip
    pub audio_start_frame: i64,
    /// Whether the renderer applies the slow zoom treatment
    pub enable_zoom: bool,
    /// Ordered caption chunks
    pub subtitles: Vec<SubtitleChunk>,
    /// Image overlay cues, at most one per image
    pub overlays: Vec<OverlayCue>,
}

/// The fully sequenced timeline handed to the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePlan {
    /// Frame rate the plan was computed for
    pub fps: f64,
    /// Total timeline length in frames
    pub total_frames: i64,
    /// Optional looping background music track
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_music: Option<String>,
    /// Take plans in timeline order
    pub takes: Vec<TakePlan>,
}

impl TimelinePlan {
    /// Sequence take plans into a timeline by accumulating durations into
    /// absolute start frames.
    pub fn sequence(fps: f64, background_music: Option<String>, mut takes: Vec<TakePlan>) -> Self {
        let mut current_frame = 0;
        for plan in &mut takes {
            plan.from_frame = current_frame;
            current_frame += plan.duration_frames;
        }

        TimelinePlan {
            fps,
            total_frames: current_frame,
            background_music,
            takes,
        }
    }
}

/// Thin per-take orchestrator: segmentation, overlay detection, sequencing.
///
/// No retry, no caching; both sub-computations are total functions over
/// in-memory inputs, so nothing is caught here.
#[derive(Debug, Clone)]
pub struct TimelineAssembler {
    fps: f64,
    segmenter: SubtitleSegmenter,
    matcher: OverlayMatcher,
}

impl TimelineAssembler {
    pub fn new(config: &Config) -> Self {
        let segmenter = SubtitleSegmenter::new(
            config.fps,
            config.subtitles.max_words_per_chunk,
            config.subtitles.max_gap_secs,
        );

        let matcher = OverlayMatcher::new(
            config.fps,
            KeywordDictionary::new(config.overlays.keywords.clone()),
            &config.overlays.early_offsets,
            config.overlays.display_window_secs,
        );

        TimelineAssembler {
            fps: config.fps,
            segmenter,
            matcher,
        }
    }

    pub fn segmenter(&self) -> &SubtitleSegmenter {
        &self.segmenter
    }

    /// Build the scene plan for one take.
    ///
    /// `from_frame` is left at zero; `TimelinePlan::sequence` assigns the
    /// absolute position once all takes are assembled.
    pub fn assemble_take(&self, resolved: &ResolvedTake) -> TakePlan {
        let take = resolved.take;

        let frame_words = self.segmenter.frame_words(resolved.words);
        let subtitles = self.segmenter.group_into_chunks(&frame_words);

        let overlays = self.matcher.detect(
            &take.transcription,
            resolved.duration_frames,
            &take.images,
            if frame_words.is_empty() {
                None
            } else {
                Some(&frame_words)
            },
        );

        debug!(
            "Take {}: {} frame(s), {} chunk(s), {} overlay(s)",
            take.id,
            resolved.duration_frames,
            subtitles.len(),
            overlays.len()
        );

        TakePlan {
            take_id: take.id,
            from_frame: 0,
            duration_frames: resolved.duration_frames,
            video: take.video_path.clone(),
            audio: take.audio_path.clone(),
            video_start_frame: (take.video_start_from * self.fps).floor() as i64,
            audio_start_frame: (take.audio_start_from * self.fps).floor() as i64,
            enable_zoom: take.enable_zoom,
            subtitles,
            overlays,
        }
    }

    /// Resolve a catalog take against the timestamp catalog
    pub fn resolve_take<'a>(
        &self,
        take: &'a Take,
        timestamps: &'a TimestampCatalog,
    ) -> ResolvedTake<'a> {
        ResolvedTake::new(take, timestamps.for_take(take.id), self.fps)
    }

    /// Assemble the whole catalog into a sequenced timeline plan
    pub fn assemble(&self, catalog: &TakeCatalog, timestamps: &TimestampCatalog) -> TimelinePlan {
        let plans = catalog
            .takes
            .iter()
            .map(|take| self.assemble_take(&self.resolve_take(take, timestamps)))
            .collect();

        TimelinePlan::sequence(self.fps, catalog.background_music.clone(), plans)
    }
}
