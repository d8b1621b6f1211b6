use std::path::Path;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::composition::canvas::{NormalizedCanvas, nearest_resolution, normalize_frame_rate};
use crate::composition::cue::{Cue, CueBuilder, OverlayStyle};
use crate::composition::layers::LayerAllocator;
use crate::errors::PlanError;
use crate::transcript::{Span, SpanKind, Transcript};

// @module: Top-level composition planning

/// Ordered set of overlay cues plus the canvas they were planned for.
///
/// Built once per transcript and never mutated afterwards; every edit
/// operation returns a new snapshot. This is the sole artifact handed to
/// the timeline sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionPlan {
    /// Canvas agreed for the whole timeline
    pub canvas: NormalizedCanvas,

    /// Sentence cues first, then word cues, each group in input order
    pub cues: Vec<Cue>,
}

impl CompositionPlan {
    /// Number of cues of the given kind
    pub fn count_of(&self, kind: SpanKind) -> usize {
        self.cues.iter().filter(|cue| cue.kind == kind).count()
    }

    /// Return a new plan with every cue's vertical placement replaced
    pub fn with_position_y(&self, position_y: f32) -> Self {
        let mut next = self.clone();
        for cue in &mut next.cues {
            cue.position_y = position_y;
        }
        next
    }

    /// Load a persisted plan from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
        serde_json::from_str(&content).context("Failed to parse composition plan JSON")
    }

    /// Save the plan as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize plan")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write plan file: {}", path.display()))?;
        Ok(())
    }
}

/// Plans a composition from a transcript: canvas normalized once, then one
/// cue per sentence and one per word, sentences first
pub struct CompositionPlanner {
    style: OverlayStyle,
    allocator: LayerAllocator,
}

impl CompositionPlanner {
    /// Create a planner with the given style and band layout
    pub fn new(style: OverlayStyle, allocator: LayerAllocator) -> Self {
        CompositionPlanner { style, allocator }
    }

    /// Planner with default style and the standard channel layout
    pub fn standard() -> Self {
        Self::new(OverlayStyle::default(), LayerAllocator::standard())
    }

    /// Produce the composition plan for a transcript.
    ///
    /// Fails only on an unusable canvas declaration. A malformed span fails
    /// just its own cue: it is logged, skipped and counted, and the rest of
    /// the plan is still produced.
    pub fn plan(&self, transcript: &Transcript) -> Result<CompositionPlan, PlanError> {
        let canvas = self.normalize_canvas(transcript)?;
        let builder = CueBuilder::new(canvas.fps, canvas.width, self.style.clone());

        let mut cues = Vec::with_capacity(transcript.sentences.len() + transcript.words.len());
        let sentence_count = build_group(
            &builder,
            &transcript.sentences,
            SpanKind::Sentence,
            &mut cues,
        );
        info!(
            "Successfully built {}/{} sentence cues",
            sentence_count,
            transcript.sentences.len()
        );

        let word_count = build_group(&builder, &transcript.words, SpanKind::Word, &mut cues);
        info!(
            "Successfully built {}/{} word cues",
            word_count,
            transcript.words.len()
        );

        self.allocator.allocate(&mut cues);

        Ok(CompositionPlan { canvas, cues })
    }

    /// Derive the immutable canvas from the transcript declaration.
    ///
    /// Declared width/height are used as-is; the catalog only supplies a
    /// label when the producer did not name the resolution. The frame rate
    /// normalizes exactly once for the whole timeline.
    fn normalize_canvas(&self, transcript: &Transcript) -> Result<NormalizedCanvas, PlanError> {
        let decl = &transcript.resolution;

        if decl.width == 0 || decl.height == 0 {
            return Err(PlanError::MalformedTranscript(format!(
                "missing or zero canvas dimensions ({}x{})",
                decl.width, decl.height
            )));
        }

        if !decl.fps.is_finite() || decl.fps <= 0.0 {
            return Err(PlanError::MalformedTranscript(format!(
                "missing or invalid frame rate: {}",
                decl.fps
            )));
        }

        let fps = normalize_frame_rate(decl.fps);
        if fps == 0 {
            return Err(PlanError::MalformedTranscript(format!(
                "frame rate {} normalizes below 1",
                decl.fps
            )));
        }

        let resolution_name = match &decl.name {
            Some(name) => name.clone(),
            None => nearest_resolution(decl.width, decl.height).0.to_string(),
        };

        Ok(NormalizedCanvas {
            resolution_name,
            width: decl.width,
            height: decl.height,
            fps,
        })
    }
}

/// Build cues for one span group, skipping and counting malformed spans
fn build_group(builder: &CueBuilder, spans: &[Span], kind: SpanKind, cues: &mut Vec<Cue>) -> usize {
    let mut built = 0;
    for (index, span) in spans.iter().enumerate() {
        match builder.build(span, kind) {
            Ok(cue) => {
                cues.push(cue);
                built += 1;
            }
            Err(e) => {
                warn!("Skipping {} span {}: {}", kind, index, e);
            }
        }
    }
    built
}
