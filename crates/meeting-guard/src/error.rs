//! Error types for the boundary operations of meeting-guard.
//!
//! The conflict and validation functions themselves never fail; errors only
//! arise while turning external input (JSON, timestamps, timezone names) into
//! the core types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    /// The input document was not valid JSON or did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Adjacency buffer out of range: {0} minutes")]
    InvalidBuffer(i64),

    #[error("Unknown policy preset: '{0}'. Available presets: client, server")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, GuardError>;
