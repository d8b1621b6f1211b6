use std::path::Path;
use anyhow::{Context, Result, anyhow};
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, from_str};
use tokio::process::Command;

use crate::composition::canvas::{nearest_resolution, normalize_frame_rate};
use crate::transcript::CanvasDecl;

// @module: ffprobe-based media probing

// @const: ffprobe frame-rate fraction, e.g. "30000/1001"
static FRAME_RATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s*/\s*(\d+)$").unwrap()
});

/// Raw stream facts read from a media file
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    /// Video width in pixels
    pub width: u32,

    /// Video height in pixels
    pub height: u32,

    /// Raw frame rate before normalization
    pub fps: f64,
}

impl MediaInfo {
    /// Build the declared resolution record for a transcript that lacks one:
    /// the catalog supplies the name and canonical pair, the normalizer the
    /// integer rate. This mirrors what the transcript service does on its
    /// own side before responding.
    pub fn to_canvas_decl(&self) -> CanvasDecl {
        let (name, (width, height)) = nearest_resolution(self.width, self.height);
        CanvasDecl {
            name: Some(name.to_string()),
            width,
            height,
            fps: f64::from(normalize_frame_rate(self.fps)),
        }
    }
}

/// Probe a video file for its first video stream's dimensions and frame rate
pub async fn probe_video<P: AsRef<Path>>(video_path: P) -> Result<MediaInfo> {
    let video_path = video_path.as_ref();

    if !video_path.exists() {
        return Err(anyhow!("Video file not found: {:?}", video_path));
    }

    // Add timeout to prevent hanging on problematic files
    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_streams",
            "-select_streams", "v:0",
            video_path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(60);
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffprobe command timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        return Err(anyhow!("ffprobe returned no stream data for {:?}", video_path));
    }

    let json: Value = from_str(&stdout).context("Failed to parse ffprobe JSON output")?;

    let stream = json
        .get("streams")
        .and_then(|s| s.as_array())
        .and_then(|streams| streams.first())
        .ok_or_else(|| anyhow!("No video stream found in {:?}", video_path))?;

    let width = stream
        .get("width")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| anyhow!("Video stream is missing a width"))? as u32;

    let height = stream
        .get("height")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| anyhow!("Video stream is missing a height"))? as u32;

    let rate_str = stream
        .get("r_frame_rate")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let fps = parse_frame_rate(rate_str)
        .ok_or_else(|| anyhow!("Unparseable frame rate: {:?}", rate_str))?;

    debug!("Probed {:?}: {}x{} @ {} fps", video_path, width, height, fps);

    Ok(MediaInfo { width, height, fps })
}

/// Parse an ffprobe frame-rate string, either a "num/den" fraction or a
/// plain decimal
pub fn parse_frame_rate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = FRAME_RATE_REGEX.captures(trimmed) {
        let numerator: f64 = caps.get(1)?.as_str().parse().ok()?;
        let denominator: f64 = caps.get(2)?.as_str().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }

    trimmed.parse::<f64>().ok().filter(|fps| fps.is_finite())
}
