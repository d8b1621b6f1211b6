use serde::{Deserialize, Serialize};

/// Canvas normalization helpers
///
/// This module provides the fixed catalog of named standard resolutions,
/// the nearest-resolution lookup, and the broadcast-safe frame rate
/// normalization that downstream sync depends on.
/// Fixed catalog of named standard resolutions, in lookup order.
pub const RESOLUTION_CATALOG: &[(&str, (u32, u32))] = &[
    ("480p", (854, 480)),
    ("2k", (2048, 1080)),
    ("4k", (3840, 2160)),
    ("8k", (7680, 4320)),
    ("instagram_story", (1080, 1920)),
    ("instagram_post", (1080, 1080)),
    ("youtube", (1920, 1080)),
    ("facebook", (1280, 720)),
    ("twitter", (1280, 720)),
];

/// Map an arbitrary (width, height) to the nearest catalog entry by L1
/// distance. Ties go to the earlier catalog entry, so the result is
/// deterministic for any input.
pub fn nearest_resolution(width: u32, height: u32) -> (&'static str, (u32, u32)) {
    let distance = |std: (u32, u32)| -> i64 {
        (i64::from(std.0) - i64::from(width)).abs() + (i64::from(std.1) - i64::from(height)).abs()
    };

    let mut best = RESOLUTION_CATALOG[0];
    let mut best_distance = distance(best.1);
    for &entry in &RESOLUTION_CATALOG[1..] {
        let d = distance(entry.1);
        if d < best_distance {
            best = entry;
            best_distance = d;
        }
    }

    best
}

/// Normalize a raw frame rate to a broadcast-safe integer rate.
///
/// Rates inside the open interval (29.1, 29.99) are camera/container drift
/// around the ~29.97 NTSC rate and collapse to 30. Everything else truncates
/// toward zero. The interval bounds are exact; no other rate is special-cased.
pub fn normalize_frame_rate(raw_fps: f64) -> u32 {
    if 29.1 < raw_fps && raw_fps < 29.99 {
        30
    } else {
        raw_fps as u32
    }
}

/// Canvas values agreed once for the whole timeline, immutable thereafter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCanvas {
    /// Catalog name for the resolution
    pub resolution_name: String,

    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Normalized integer frame rate
    pub fps: u32,
}

impl NormalizedCanvas {
    /// Label for log output, e.g. "youtube 1920x1080 @ 30 fps"
    pub fn describe(&self) -> String {
        format!(
            "{} {}x{} @ {} fps",
            self.resolution_name, self.width, self.height, self.fps
        )
    }
}
