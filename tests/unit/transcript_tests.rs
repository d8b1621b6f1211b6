/*!
 * Tests for the transcript data model
 */

use anyhow::Result;
use overtitle::errors::SpanError;
use overtitle::transcript::{Span, Transcript, transcript_path};

use crate::common;

/// Test span validation accepts well-formed spans
#[test]
fn test_span_validate_withWellFormedSpan_shouldSucceed() {
    let span = Span::new("hello world", 1.0, 2.5);
    assert!(span.validate().is_ok());
    assert_eq!(span.duration(), 1.5);
    assert_eq!(span.token_count(), 2);
}

/// Test span validation rejects a reversed time range
#[test]
fn test_span_validate_withEndBeforeStart_shouldFail() {
    let span = Span::new("backwards", 2.0, 1.0);
    assert!(matches!(
        span.validate(),
        Err(SpanError::InvalidTimeRange { .. })
    ));

    // Zero-length spans are invalid too
    let span = Span::new("instant", 2.0, 2.0);
    assert!(span.validate().is_err());
}

/// Test service JSON parses into the expected shape
#[test]
fn test_from_json_withServiceResponse_shouldParse() -> Result<()> {
    let transcript = Transcript::from_json(common::sample_transcript_json())?;

    assert_eq!(transcript.resolution.name.as_deref(), Some("instagram_post"));
    assert_eq!(transcript.resolution.width, 1080);
    assert_eq!(transcript.resolution.height, 1080);
    assert_eq!(transcript.resolution.fps, 30.0);
    assert_eq!(transcript.sentences.len(), 2);
    assert_eq!(transcript.words.len(), 3);
    assert_eq!(transcript.words[0].text, " Yeah,");

    Ok(())
}

/// Test a transcript without a resolution record still parses; planning is
/// where the missing canvas becomes an error
#[test]
fn test_from_json_withoutResolution_shouldParseWithZeroCanvas() -> Result<()> {
    let transcript = Transcript::from_json(r#"{"sentences": [], "words": []}"#)?;

    assert_eq!(transcript.resolution.width, 0);
    assert_eq!(transcript.resolution.height, 0);
    assert_eq!(transcript.resolution.fps, 0.0);

    Ok(())
}

/// Test save and load round-trip losslessly
#[test]
fn test_save_load_withSampleTranscript_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("transcript.json");

    let transcript = common::sample_transcript();
    transcript.save(&path)?;
    let loaded = Transcript::load(&path)?;

    assert_eq!(transcript, loaded);
    Ok(())
}

/// Test editing operations return new snapshots without touching the original
#[test]
fn test_with_word_added_shouldReturnNewSnapshot() {
    let transcript = common::sample_transcript();
    let edited = transcript.with_word_added(Span::new("extra", 2.5, 3.0));

    assert_eq!(transcript.words.len(), 3);
    assert_eq!(edited.words.len(), 4);
    assert_eq!(edited.words[3].text, "extra");
}

/// Test word removal by index
#[test]
fn test_with_word_removed_withValidIndex_shouldDropWord() -> Result<()> {
    let transcript = common::sample_transcript();
    let edited = transcript.with_word_removed(1)?;

    assert_eq!(transcript.words.len(), 3);
    assert_eq!(edited.words.len(), 2);
    assert_eq!(edited.words[0].text, "Yeah,");
    assert_eq!(edited.words[1].text, "ahead.");

    Ok(())
}

/// Test out-of-range removal fails without mutating anything
#[test]
fn test_with_word_removed_withBadIndex_shouldFail() {
    let transcript = common::sample_transcript();
    assert!(transcript.with_word_removed(99).is_err());
    assert_eq!(transcript.words.len(), 3);
}

/// Test sentence editing mirrors word editing
#[test]
fn test_with_sentence_operations_shouldReturnNewSnapshots() -> Result<()> {
    let transcript = common::sample_transcript();

    let added = transcript.with_sentence_added(Span::new("One more.", 8.0, 9.0));
    assert_eq!(added.sentences.len(), 3);

    let removed = added.with_sentence_removed(0)?;
    assert_eq!(removed.sentences.len(), 2);
    assert_eq!(removed.sentences[0].text, "So the thing is that I'm on Wi-Fi.");

    Ok(())
}

/// Test the per-video transcript location
#[test]
fn test_transcript_path_withBaseName_shouldNestUnderOutput() {
    let path = transcript_path("output", "talk");
    assert_eq!(path, std::path::PathBuf::from("output/talk/transcript.json"));
}
