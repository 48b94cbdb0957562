use anyhow::{Context, Result};
use log::{info, warn, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::take::TakeCatalog;
use crate::timeline_assembler::{TimelineAssembler, TimelinePlan};
use crate::transcript::TimestampCatalog;

// @module: Application controller for timeline assembly

/// Main application controller for timeline assembly
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    #[allow(dead_code)]
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Assemble the take catalog into a scene plan JSON file.
    ///
    /// Loads the take catalog and (optional) timestamp catalog, runs the
    /// assembler across takes, writes the plan, and appends a line to the
    /// assembly report beside it.
    pub fn run(
        &self,
        takes_path: &Path,
        timestamps_path: Option<&Path>,
        output_path: Option<&Path>,
        force_overwrite: bool,
    ) -> Result<()> {
        let catalog = TakeCatalog::from_file(takes_path)?;
        let timestamps = self.load_timestamps(timestamps_path)?;

        let plan_path = match output_path {
            Some(path) => path.to_path_buf(),
            None => FileManager::generate_plan_path(takes_path, "json"),
        };

        if FileManager::file_exists(&plan_path) && !force_overwrite {
            warn!(
                "Plan file already exists: {:?}. Use -f to force overwrite.",
                plan_path
            );
            return Ok(());
        }

        info!("Assembling {} take(s) at {} fps", catalog.takes.len(), self.config.fps);

        let plan = self.assemble_with_progress(&catalog, &timestamps);

        self.write_plan(&plan, &plan_path)?;

        let chunk_count: usize = plan.takes.iter().map(|t| t.subtitles.len()).sum();
        let cue_count: usize = plan.takes.iter().map(|t| t.overlays.len()).sum();

        info!(
            "Success: {:?} ({} frames, {} caption chunks, {} overlay cues)",
            plan_path, plan.total_frames, chunk_count, cue_count
        );

        let report_path = plan_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("assembly.log");
        FileManager::append_to_report(
            &report_path,
            &format!(
                "assembled {} takes -> {:?}: {} frames, {} chunks, {} cues",
                plan.takes.len(),
                plan_path.file_name().unwrap_or_default(),
                plan.total_frames,
                chunk_count,
                cue_count
            ),
        )?;

        Ok(())
    }

    /// Print per-take duration, caption, and overlay details without writing a plan.
    ///
    /// The caption chunks are shown as SRT-formatted text for quick visual
    /// inspection of the computed timing.
    pub fn debug_takes(&self, takes_path: &Path, timestamps_path: Option<&Path>) -> Result<()> {
        let catalog = TakeCatalog::from_file(takes_path)?;
        let timestamps = self.load_timestamps(timestamps_path)?;

        let assembler = TimelineAssembler::new(&self.config);
        let plan = assembler.assemble(&catalog, &timestamps);

        println!("Timeline: {} take(s), {} frames at {} fps", plan.takes.len(), plan.total_frames, plan.fps);

        for take_plan in &plan.takes {
            println!();
            println!(
                "Take {}: frames {}..{} ({} frames)",
                take_plan.take_id,
                take_plan.from_frame,
                take_plan.from_frame + take_plan.duration_frames,
                take_plan.duration_frames
            );

            if take_plan.subtitles.is_empty() {
                println!("  no caption chunks (no word timestamps)");
            } else {
                println!("  {} caption chunk(s):", take_plan.subtitles.len());
                for line in assembler
                    .segmenter()
                    .chunks_to_srt(&take_plan.subtitles)
                    .lines()
                {
                    println!("    {}", line);
                }
            }

            if take_plan.overlays.is_empty() {
                println!("  no overlay cues");
            } else {
                for cue in &take_plan.overlays {
                    println!(
                        "  overlay {} at frames {}..{} (keyword '{}')",
                        cue.image_path, cue.start_frame, cue.end_frame, cue.keyword
                    );
                }
            }
        }

        Ok(())
    }

    fn load_timestamps(&self, timestamps_path: Option<&Path>) -> Result<TimestampCatalog> {
        match timestamps_path {
            Some(path) if FileManager::file_exists(path) => TimestampCatalog::from_file(path),
            Some(path) => {
                warn!(
                    "Timestamp file not found: {:?}. Falling back to proportional overlay timing.",
                    path
                );
                Ok(TimestampCatalog::empty())
            }
            None => {
                debug!("No timestamp file given, using proportional overlay timing");
                Ok(TimestampCatalog::empty())
            }
        }
    }

    fn assemble_with_progress(
        &self,
        catalog: &TakeCatalog,
        timestamps: &TimestampCatalog,
    ) -> TimelinePlan {
        let assembler = TimelineAssembler::new(&self.config);

        let progress = ProgressBar::new(catalog.takes.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let plans = catalog
            .takes
            .iter()
            .map(|take| {
                progress.set_message(format!("take {}", take.id));
                let plan = assembler.assemble_take(&assembler.resolve_take(take, timestamps));
                progress.inc(1);
                plan
            })
            .collect();

        progress.finish_and_clear();

        TimelinePlan::sequence(self.config.fps, catalog.background_music.clone(), plans)
    }

    fn write_plan(&self, plan: &TimelinePlan, plan_path: &PathBuf) -> Result<()> {
        if let Some(parent) = plan_path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let json = serde_json::to_string_pretty(plan).context("Failed to serialize scene plan")?;
        std::fs::write(plan_path, json)
            .with_context(|| format!("Failed to write scene plan: {}", plan_path.display()))?;

        Ok(())
    }
}
