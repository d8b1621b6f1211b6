/*!
 * Error types for the overtitle application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the transcription service
#[derive(Error, Debug)]
pub enum TranscribeError {
    /// Error when making an API request fails
    #[error("Transcription request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing the transcript response fails
    #[error("Failed to parse transcript response: {0}")]
    ParseError(String),

    /// Error returned by the service itself
    #[error("Transcription service responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors affecting a single transcript span; always recovered by skipping
/// just the cue built from that span
#[derive(Error, Debug)]
pub enum SpanError {
    /// Span end time is not after its start time
    #[error("Invalid time range: end {end} <= start {start}")]
    InvalidTimeRange {
        /// Start time in seconds
        start: f64,
        /// End time in seconds
        end: f64,
    },

    /// Span carries a NaN or infinite timestamp
    #[error("Non-finite timestamp in span \"{0}\"")]
    NonFiniteTime(String),

    /// Span text is empty after trimming
    #[error("Empty span text")]
    EmptyText,
}

/// Errors that can occur while planning a composition
#[derive(Error, Debug)]
pub enum PlanError {
    /// Transcript is missing or declares an unusable canvas; fatal for the plan
    #[error("Malformed transcript: {0}")]
    MalformedTranscript(String),

    /// Error from a single span
    #[error("Span error: {0}")]
    Span(#[from] SpanError),
}

/// Errors that can occur when driving the external timeline sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// The editor executable could not be launched
    #[error("Timeline sink unavailable: {0}")]
    Unavailable(String),

    /// The editor process ran but exited with a failure
    #[error("Timeline sink process failed: {0}")]
    ProcessFailed(String),

    /// The editor process did not finish within the configured timeout
    #[error("Timeline sink timed out after {0}s")]
    Timeout(u64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the transcription service
    #[error("Transcribe error: {0}")]
    Transcribe(#[from] TranscribeError),

    /// Error from composition planning
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Error from the timeline sink
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

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
