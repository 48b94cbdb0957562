// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod overlay_matcher;
mod subtitle_segmenter;
mod take;
mod text_normalizer;
mod timeline_assembler;
mod transcript;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a take catalog into a scene plan (default command)
    Assemble(AssembleArgs),

    /// Print per-take timing details without writing a plan
    Debug(DebugArgs),

    /// Generate shell completions for reelsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Take catalog JSON file to process
    #[arg(value_name = "TAKES_PATH")]
    takes_path: PathBuf,

    /// Word timestamp catalog JSON file from the transcription step
    #[arg(short, long)]
    timestamps: Option<PathBuf>,

    /// Output path for the scene plan (default: <takes>.plan.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing scene plan
    #[arg(short, long)]
    force_overwrite: bool,

    /// Timeline frame rate override
    #[arg(long)]
    fps: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct DebugArgs {
    /// Take catalog JSON file to inspect
    #[arg(value_name = "TAKES_PATH")]
    takes_path: PathBuf,

    /// Word timestamp catalog JSON file from the transcription step
    #[arg(short, long)]
    timestamps: Option<PathBuf>,

    /// Timeline frame rate override
    #[arg(long)]
    fps: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// reelsync - Timeline synchronization for short-form video assembly
///
/// Converts speech-recognition word timestamps into frame-accurate captions,
/// detects keyword-triggered image overlays, and sequences takes into a
/// declarative scene plan for the renderer.
#[derive(Parser, Debug)]
#[command(name = "reelsync")]
#[command(version = "1.0.0")]
#[command(about = "Caption and overlay timing for short-form video assembly")]
#[command(long_about = "reelsync assembles short-form vertical videos from discrete takes. It turns
word-level speech timestamps into frame-accurate caption chunks, matches
configured keyword phrases against each take's transcript to place image
overlays, and writes a declarative scene plan for an external renderer.

EXAMPLES:
    reelsync takes.json                          # Assemble using default config
    reelsync -t timestamps.json takes.json       # Use precise word timing
    reelsync -f takes.json                       # Force overwrite existing plan
    reelsync --fps 60 takes.json                 # Override the frame rate
    reelsync debug -t timestamps.json takes.json # Inspect per-take timing
    reelsync --log-level debug takes.json        # Verbose logging
    reelsync completions bash > reelsync.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The config holds the frame rate, caption
    grouping limits, the keyword dictionary, and per-image overlay offsets.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Take catalog JSON file to process
    #[arg(value_name = "TAKES_PATH")]
    takes_path: Option<PathBuf>,

    /// Word timestamp catalog JSON file from the transcription step
    #[arg(short, long)]
    timestamps: Option<PathBuf>,

    /// Output path for the scene plan (default: <takes>.plan.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing scene plan
    #[arg(short, long)]
    force_overwrite: bool,

    /// Timeline frame rate override
    #[arg(long)]
    fps: Option<f64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "reelsync", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Debug(args)) => run_debug(args),
        Some(Commands::Assemble(args)) => run_assemble(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let takes_path = cli
                .takes_path
                .ok_or_else(|| anyhow!("TAKES_PATH is required when no subcommand is specified"))?;

            let assemble_args = AssembleArgs {
                takes_path,
                timestamps: cli.timestamps,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                fps: cli.fps,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_assemble(assemble_args)
        }
    }
}

/// Load the configuration, creating a default file when none exists, and
/// apply command line overrides.
fn load_config(config_path: &str, fps: Option<f64>, log_level: &Option<CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(fps) = fps {
        config.fps = fps;
    }

    if let Some(log_level) = log_level {
        config.log_level = log_level.clone().into();
    } else {
        // If log level was not set via command line, update it from config now
        log::set_max_level(level_filter_for(&config.log_level));
    }

    Ok(config)
}

fn run_assemble(options: AssembleArgs) -> Result<()> {
    let config = load_config(&options.config_path, options.fps, &options.log_level)?;

    let controller = Controller::with_config(config)?;

    if !options.takes_path.is_file() {
        return Err(anyhow!("Take catalog does not exist: {:?}", options.takes_path));
    }

    controller.run(
        &options.takes_path,
        options.timestamps.as_deref(),
        options.output.as_deref(),
        options.force_overwrite,
    )
}

fn run_debug(options: DebugArgs) -> Result<()> {
    let config = load_config(&options.config_path, options.fps, &options.log_level)?;

    let controller = Controller::with_config(config)?;

    if !options.takes_path.is_file() {
        return Err(anyhow!("Take catalog does not exist: {:?}", options.takes_path));
    }

    controller.debug_takes(&options.takes_path, options.timestamps.as_deref())
}
