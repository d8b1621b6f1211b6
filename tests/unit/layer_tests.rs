/*!
 * Tests for channel band allocation
 */

use overtitle::composition::cue::{CueBuilder, OverlayStyle};
use overtitle::composition::layers::{
    AUDIO_CHANNEL, BAND_WIDTH, LayerAllocator, SENTENCE_BASE_CHANNEL, VIDEO_CHANNEL,
    WORD_BASE_CHANNEL,
};
use overtitle::transcript::{Span, SpanKind};

fn build_cues(sentences: &[(&str, f64, f64)], words: &[(&str, f64, f64)]) -> Vec<overtitle::Cue> {
    let builder = CueBuilder::new(30, 1920, OverlayStyle::default());
    let mut cues = Vec::new();
    for (text, start, end) in sentences {
        cues.push(
            builder
                .build(&Span::new(*text, *start, *end), SpanKind::Sentence)
                .unwrap(),
        );
    }
    for (text, start, end) in words {
        cues.push(
            builder
                .build(&Span::new(*text, *start, *end), SpanKind::Word)
                .unwrap(),
        );
    }
    cues
}

/// Test the standard channel layout keeps every band above video and audio
#[test]
fn test_standard_layout_withDefaults_shouldStackAboveMediaChannels() {
    assert!(VIDEO_CHANNEL < AUDIO_CHANNEL);
    assert!(AUDIO_CHANNEL < SENTENCE_BASE_CHANNEL);
    assert!(SENTENCE_BASE_CHANNEL + BAND_WIDTH <= WORD_BASE_CHANNEL);
}

/// Test sentence and word cues land on their own disjoint bands
#[test]
fn test_allocate_withMixedKinds_shouldAssignDisjointBands() {
    let mut cues = build_cues(
        &[("first sentence here", 0.0, 2.0), ("second sentence here", 2.0, 4.0)],
        &[("first", 0.0, 0.5), ("second", 0.5, 1.0)],
    );

    LayerAllocator::standard().allocate(&mut cues);

    for cue in &cues {
        match cue.kind {
            SpanKind::Sentence => assert_eq!(cue.layer, SENTENCE_BASE_CHANNEL),
            SpanKind::Word => assert_eq!(cue.layer, WORD_BASE_CHANNEL),
        }
    }

    // No channel of one band may appear in the other
    let sentence_channels = [
        SENTENCE_BASE_CHANNEL,
        SENTENCE_BASE_CHANNEL + 1,
        SENTENCE_BASE_CHANNEL + 2,
    ];
    for offset in 0..BAND_WIDTH {
        assert!(!sentence_channels.contains(&(WORD_BASE_CHANNEL + offset)));
    }
}

/// Test every cue of one kind reuses the same band
#[test]
fn test_allocate_withManySentences_shouldReuseOneBand() {
    let mut cues = build_cues(
        &[
            ("sentence one text", 0.0, 1.0),
            ("sentence two text", 1.0, 2.0),
            ("sentence three text", 2.0, 3.0),
        ],
        &[],
    );

    LayerAllocator::standard().allocate(&mut cues);

    let layers: Vec<u32> = cues.iter().map(|cue| cue.layer).collect();
    assert_eq!(layers, vec![SENTENCE_BASE_CHANNEL; 3]);
}

/// Test overlapping spans violate the precondition without crashing
#[test]
fn test_allocate_withOverlappingSentences_shouldWarnNotPanic() {
    let mut cues = build_cues(
        &[
            ("overlapping sentence one", 0.0, 5.0),
            ("overlapping sentence two", 2.0, 6.0),
        ],
        &[],
    );

    // Precondition violation: both spans share frames. The allocator must
    // still assign bands and return normally.
    LayerAllocator::standard().allocate(&mut cues);

    assert_eq!(cues[0].layer, SENTENCE_BASE_CHANNEL);
    assert_eq!(cues[1].layer, SENTENCE_BASE_CHANNEL);
}

/// Test custom band bases are honored and checked for disjointness
#[test]
fn test_allocator_withCustomBases_shouldReportDisjointness() {
    let disjoint = LayerAllocator::new(4, 7);
    assert!(disjoint.bands_disjoint());

    let overlapping = LayerAllocator::new(4, 5);
    assert!(!overlapping.bands_disjoint());

    let reversed = LayerAllocator::new(8, 5);
    assert!(reversed.bands_disjoint());
}
