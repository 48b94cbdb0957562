/*!
 * Error types for the reelsync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised when ingesting word-level speech timestamps
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// Word starts earlier than its predecessor
    #[error("word {index} ('{word}') starts at {start}s, before predecessor start {prev_start}s")]
    InputOrdering {
        /// Position of the offending word in the sequence
        index: usize,
        /// The offending word text
        word: String,
        /// Start time of the offending word in seconds
        start: f64,
        /// Start time of the preceding word in seconds
        prev_start: f64,
    },

    /// Word ends before it starts
    #[error("word {index} ('{word}') ends at {end}s, before its start {start}s")]
    InvertedRange {
        /// Position of the offending word in the sequence
        index: usize,
        /// The offending word text
        word: String,
        /// Start time in seconds
        start: f64,
        /// End time in seconds
        end: f64,
    },

    /// Word carries a negative start time
    #[error("word {index} ('{word}') has a negative start time {start}s")]
    NegativeStart {
        /// Position of the offending word in the sequence
        index: usize,
        /// The offending word text
        word: String,
        /// Start time in seconds
        start: f64,
    },
}

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configuration value is outside its allowed range
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from timestamp ingestion
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
