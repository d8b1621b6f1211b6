/*!
 * Timeline overlay composition engine.
 *
 * This module turns a timed transcript into a conflict-free, fading
 * multi-layer overlay schedule for the external timeline sink. It is split
 * into several submodules:
 *
 * - `canvas`: Resolution catalog lookup and frame-rate normalization
 * - `cue`: Per-span cue construction (frame range, geometry, visibility curve)
 * - `layers`: Channel band allocation and overlap validation
 * - `planner`: Top-level orchestration producing the composition plan
 */

// Re-export main types for easier usage
pub use self::canvas::{NormalizedCanvas, nearest_resolution, normalize_frame_rate};
pub use self::cue::{Alignment, Cue, CueBuilder, OpacityKey, OverlayStyle, VisibilityCurve};
pub use self::layers::{LayerAllocator, BAND_WIDTH};
pub use self::planner::{CompositionPlan, CompositionPlanner};

// Submodules
pub mod canvas;
pub mod cue;
pub mod layers;
pub mod planner;
