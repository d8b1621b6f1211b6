/*!
 * # overtitle - Transcript overlay composition for video timelines
 *
 * A Rust library for turning speech transcripts into timed overlay
 * composition plans and driving an external editor to apply and render them.
 *
 * ## Features
 *
 * - Transcribe videos through an external transcription service
 * - Plan deterministic overlay cues from sentence- and word-level timing
 * - Fade curves for multi-word cues, hidden placeholders for per-word cues
 * - Collision-free channel band allocation for overlapping roles
 * - Frame-rate normalization and nearest-standard-resolution mapping
 * - Batch processing of whole video folders
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `transcript`: Transcript data model and JSON persistence
 * - `composition`: The overlay composition engine:
 *   - `composition::canvas`: Resolution catalog and frame-rate normalization
 *   - `composition::cue`: Cue construction from transcript spans
 *   - `composition::layers`: Channel band allocation
 *   - `composition::planner`: Composition plan orchestration
 * - `transcribe`: Client for the transcription service
 * - `media_probe`: ffprobe-based stream probing
 * - `sink`: Timeline sink abstraction and external editor driver
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod composition;
pub mod errors;
pub mod file_utils;
pub mod media_probe;
pub mod sink;
pub mod transcribe;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use composition::{CompositionPlan, CompositionPlanner, Cue, VisibilityCurve};
pub use errors::{AppError, PlanError, SinkError, SpanError, TranscribeError};
pub use transcript::{Span, SpanKind, Transcript};
