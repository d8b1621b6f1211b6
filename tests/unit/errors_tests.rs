/*!
 * Tests for error types and conversions
 */

use overtitle::errors::{AppError, PlanError, SinkError, SpanError, TranscribeError};

#[test]
fn test_transcribeError_requestFailed_shouldDisplayCorrectly() {
    let error = TranscribeError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Transcription request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_transcribeError_apiError_shouldDisplayStatusAndMessage() {
    let error = TranscribeError::ApiError {
        status_code: 503,
        message: "Service warming up".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service warming up"));
}

#[test]
fn test_spanError_invalidTimeRange_shouldDisplayBothTimes() {
    let error = SpanError::InvalidTimeRange {
        start: 4.5,
        end: 3.0,
    };
    let display = format!("{}", error);
    assert!(display.contains("4.5"));
    assert!(display.contains("3"));
    assert!(display.contains("Invalid time range"));
}

#[test]
fn test_planError_fromSpanError_shouldWrapCorrectly() {
    let span_error = SpanError::EmptyText;
    let plan_error: PlanError = span_error.into();
    let display = format!("{}", plan_error);
    assert!(display.contains("Span error"));
    assert!(display.contains("Empty span text"));
}

#[test]
fn test_planError_malformedTranscript_shouldDisplayReason() {
    let error = PlanError::MalformedTranscript("missing frame rate".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Malformed transcript"));
    assert!(display.contains("missing frame rate"));
}

#[test]
fn test_sinkError_timeout_shouldDisplaySeconds() {
    let error = SinkError::Timeout(300);
    let display = format!("{}", error);
    assert!(display.contains("300"));
}

#[test]
fn test_appError_fromPlanError_shouldWrapCorrectly() {
    let plan_error = PlanError::MalformedTranscript("no canvas".to_string());
    let app_error: AppError = plan_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Plan error"));
    assert!(display.contains("no canvas"));
}

#[test]
fn test_appError_fromSinkError_shouldWrapCorrectly() {
    let sink_error = SinkError::Unavailable("editor not installed".to_string());
    let app_error: AppError = sink_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Sink error"));
    assert!(display.contains("editor not installed"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("missing file"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let anyhow_error = anyhow::anyhow!("something odd");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("something odd"));
}
