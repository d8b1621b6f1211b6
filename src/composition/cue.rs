use serde::{Deserialize, Serialize};

use crate::errors::SpanError;
use crate::transcript::{Span, SpanKind};

// @module: Cue construction from transcript spans

/// Vertical placement presets carried over from the editor's normalized
/// coordinate space: 1.0 is the top edge, 0 the center, -1.0 the bottom.
pub const POSITION_TOP: f32 = 0.9;
/// Lower-third placement
pub const POSITION_BOTTOM: f32 = 0.1;
/// Placement used when cues are first built
pub const POSITION_DEFAULT: f32 = 0.0;

/// Visual style knobs applied to every overlay cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Horizontal safe margin in pixels on each side of the text box
    #[serde(default = "default_margin_px")]
    pub margin_px: u32,

    /// Font size in points
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Text box height in pixels (one line)
    #[serde(default = "default_line_height")]
    pub line_height: u32,

    /// Fade in/out length in frames
    #[serde(default = "default_fade_frames")]
    pub fade_frames: u32,

    /// Backdrop box opacity
    #[serde(default = "default_background_alpha")]
    pub background_alpha: f32,
}

fn default_margin_px() -> u32 {
    80
}

fn default_font_size() -> u32 {
    60
}

fn default_line_height() -> u32 {
    120
}

fn default_fade_frames() -> u32 {
    10
}

fn default_background_alpha() -> f32 {
    0.7
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            margin_px: default_margin_px(),
            font_size: default_font_size(),
            line_height: default_line_height(),
            fade_frames: default_fade_frames(),
            background_alpha: default_background_alpha(),
        }
    }
}

/// A single opacity keyframe on a cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityKey {
    /// Frame the key sits on
    pub frame: i64,
    /// Opacity value at that frame
    pub opacity: f32,
}

impl OpacityKey {
    fn new(frame: i64, opacity: f32) -> Self {
        OpacityKey { frame, opacity }
    }
}

/// Opacity keyframe pattern applied to a cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "curve", rename_all = "snake_case")]
pub enum VisibilityCurve {
    /// Fade up over the leading frames, hold, fade back out at the end
    FadeInOut {
        /// Four keys: rise start, rise end, fall start, fall end
        keys: [OpacityKey; 4],
    },
    /// Pinned to zero opacity for the whole frame range; the element stays
    /// on the timeline but is never visible
    HiddenAlways {
        /// Two keys, one at each frame bound
        keys: [OpacityKey; 2],
    },
}

impl VisibilityCurve {
    /// All keyframes of the curve in timeline order
    pub fn keys(&self) -> &[OpacityKey] {
        match self {
            VisibilityCurve::FadeInOut { keys } => keys,
            VisibilityCurve::HiddenAlways { keys } => keys,
        }
    }

    /// Whether the cue is ever visible
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityCurve::FadeInOut { .. })
    }
}

/// Horizontal text alignment inside the cue box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    /// Centered in the box
    Center,
}

/// Vertical text alignment inside the cue box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Anchored to the box bottom
    Bottom,
}

/// Text alignment of a cue box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    /// Horizontal alignment
    pub horizontal: HorizontalAlign,
    /// Vertical alignment
    pub vertical: VerticalAlign,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment {
            horizontal: HorizontalAlign::Center,
            vertical: VerticalAlign::Bottom,
        }
    }
}

// @struct: One planned overlay element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    // @field: Which transcript sequence produced the cue
    pub kind: SpanKind,

    // @field: Overlay text
    pub text: String,

    // @field: First frame of the cue
    pub frame_start: i64,

    // @field: Last frame of the cue
    pub frame_end: i64,

    // @field: Base channel of the cue's 3-layer band; assigned by the allocator
    pub layer: u32,

    // @field: Opacity keyframe pattern
    pub visibility: VisibilityCurve,

    // @field: Text box width in pixels
    pub box_width: u32,

    // @field: Text box height in pixels
    pub box_height: u32,

    // @field: Font size in points
    pub font_size: u32,

    // @field: Backdrop opacity
    pub background_alpha: f32,

    // @field: Text alignment inside the box
    pub alignment: Alignment,

    // @field: Vertical placement in the editor's normalized coordinates
    pub position_y: f32,
}

impl Cue {
    /// Channel of the text element inside the band
    pub fn text_channel(&self) -> u32 {
        self.layer + 2
    }

    /// Channel of the background/transform element inside the band
    pub fn backdrop_channel(&self) -> u32 {
        self.layer + 1
    }

    /// Cue length in frames
    pub fn frame_count(&self) -> i64 {
        self.frame_end - self.frame_start
    }
}

/// Builds cues from transcript spans for a fixed canvas
pub struct CueBuilder {
    fps: u32,
    canvas_width: u32,
    style: OverlayStyle,
}

impl CueBuilder {
    /// Create a builder for the given normalized frame rate and canvas width
    pub fn new(fps: u32, canvas_width: u32, style: OverlayStyle) -> Self {
        CueBuilder {
            fps,
            canvas_width,
            style,
        }
    }

    /// Build one cue from a span.
    ///
    /// Frame bounds truncate toward zero (`floor(t * fps)` for t >= 0), the
    /// same rounding direction the frame-rate normalizer uses, so per-span
    /// durations stay consistent with total-timeline math.
    pub fn build(&self, span: &Span, kind: SpanKind) -> Result<Cue, SpanError> {
        span.validate()?;

        let fps = f64::from(self.fps);
        let frame_start = (span.start * fps).floor() as i64;
        let frame_end = (span.end * fps).floor() as i64;

        // Spans of exactly one token stay on the timeline but are never
        // shown; everything else fades in and out.
        let visibility = if span.token_count() != 1 {
            self.fade_in_out(frame_start, frame_end)
        } else {
            VisibilityCurve::HiddenAlways {
                keys: [
                    OpacityKey::new(frame_start, 0.0),
                    OpacityKey::new(frame_end, 0.0),
                ],
            }
        };

        Ok(Cue {
            kind,
            text: span.text.trim().to_string(),
            frame_start,
            frame_end,
            layer: 0,
            visibility,
            box_width: self.canvas_width.saturating_sub(2 * self.style.margin_px),
            box_height: self.style.line_height,
            font_size: self.style.font_size,
            background_alpha: self.style.background_alpha,
            alignment: Alignment::default(),
            position_y: POSITION_DEFAULT,
        })
    }

    /// Four-key fade curve. Spans shorter than two fades would cross their
    /// middle keys; both middle keys collapse onto the span midpoint instead
    /// so the ordering start <= k1 <= k2 <= end always holds.
    fn fade_in_out(&self, frame_start: i64, frame_end: i64) -> VisibilityCurve {
        let fade = i64::from(self.style.fade_frames);

        let (rise_end, fall_start) = if frame_end - frame_start < 2 * fade {
            let midpoint = (frame_start + frame_end) / 2;
            (midpoint, midpoint)
        } else {
            (frame_start + fade, frame_end - fade)
        };

        VisibilityCurve::FadeInOut {
            keys: [
                OpacityKey::new(frame_start, 0.0),
                OpacityKey::new(rise_end, 1.0),
                OpacityKey::new(fall_start, 1.0),
                OpacityKey::new(frame_end, 0.0),
            ],
        }
    }
}
