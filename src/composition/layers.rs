use log::warn;

use crate::composition::cue::Cue;
use crate::transcript::SpanKind;

// @module: Channel band allocation for overlay cues

/// Channel reserved for the primary video strip
pub const VIDEO_CHANNEL: u32 = 1;
/// Channel reserved for the audio strip
pub const AUDIO_CHANNEL: u32 = 2;
/// Base channel of the sentence overlay band
pub const SENTENCE_BASE_CHANNEL: u32 = 4;
/// Base channel of the word overlay band
pub const WORD_BASE_CHANNEL: u32 = 7;

/// Channels per band: base slot, background/transform element, text element
pub const BAND_WIDTH: u32 = 3;

/// Assigns each cue a channel band.
///
/// Every sentence cue shares the constant sentence band and every word cue
/// the constant word band. Band reuse is safe because spans within one
/// transcript sequence do not overlap in time; the allocator checks that
/// precondition up front and reports violations as warnings, never errors.
#[derive(Debug, Clone, Copy)]
pub struct LayerAllocator {
    sentence_base: u32,
    word_base: u32,
}

impl LayerAllocator {
    /// Create an allocator with the given band bases
    pub fn new(sentence_base: u32, word_base: u32) -> Self {
        LayerAllocator {
            sentence_base,
            word_base,
        }
    }

    /// Allocator with the standard channel layout
    pub fn standard() -> Self {
        Self::new(SENTENCE_BASE_CHANNEL, WORD_BASE_CHANNEL)
    }

    /// Whether the two bands share no channel
    pub fn bands_disjoint(&self) -> bool {
        let hi = self.sentence_base.max(self.word_base);
        let lo = self.sentence_base.min(self.word_base);
        hi - lo >= BAND_WIDTH
    }

    /// Assign a band to every cue in place.
    ///
    /// Runs the overlap pre-check first so a precondition violation is at
    /// least visible in the logs before cues land on a shared band.
    pub fn allocate(&self, cues: &mut [Cue]) {
        self.warn_on_overlaps(cues);

        for cue in cues.iter_mut() {
            cue.layer = match cue.kind {
                SpanKind::Sentence => self.sentence_base,
                SpanKind::Word => self.word_base,
            };
        }
    }

    /// Count temporally overlapping cue pairs within each kind and warn.
    /// Overlapping cues on a reused band collide visually; the plan is still
    /// produced.
    fn warn_on_overlaps(&self, cues: &[Cue]) {
        for kind in [SpanKind::Sentence, SpanKind::Word] {
            let overlaps = count_overlaps(cues, kind);
            if overlaps > 0 {
                warn!(
                    "Found {} overlapping {} cues; overlapping cues share one band and will collide visually",
                    overlaps, kind
                );
            }
        }
    }
}

/// Count adjacent overlapping frame ranges among cues of one kind
fn count_overlaps(cues: &[Cue], kind: SpanKind) -> usize {
    let mut ranges: Vec<(i64, i64)> = cues
        .iter()
        .filter(|cue| cue.kind == kind)
        .map(|cue| (cue.frame_start, cue.frame_end))
        .collect();
    ranges.sort_by_key(|range| range.0);

    ranges
        .windows(2)
        .filter(|pair| pair[0].1 > pair[1].0)
        .count()
}
