/*!
 * Tests for application configuration
 */

use anyhow::Result;
use overtitle::app_config::{ChannelConfig, Config, LogLevel};

/// Test default configuration passes validation
#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.transcription.endpoint, "http://localhost:8000/transcribe/");
    assert_eq!(config.channels.sentence_base, 4);
    assert_eq!(config.channels.word_base, 7);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test default style matches the visual constants
#[test]
fn test_default_config_shouldCarryDefaultStyle() {
    let config = Config::default();
    assert_eq!(config.style.margin_px, 80);
    assert_eq!(config.style.font_size, 60);
    assert_eq!(config.style.line_height, 120);
    assert_eq!(config.style.fade_frames, 10);
    assert!((config.style.background_alpha - 0.7).abs() < f32::EPSILON);
}

/// Test an invalid endpoint URL fails validation
#[test]
fn test_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.transcription.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

/// Test overlapping channel bands fail validation
#[test]
fn test_validate_withOverlappingBands_shouldFail() {
    let mut config = Config::default();
    config.channels = ChannelConfig {
        sentence_base: 4,
        word_base: 5,
    };
    assert!(config.validate().is_err());
}

/// Test bands below the audio channel fail validation
#[test]
fn test_validate_withBandOnMediaChannel_shouldFail() {
    let mut config = Config::default();
    config.channels = ChannelConfig {
        sentence_base: 2,
        word_base: 7,
    };
    assert!(config.validate().is_err());
}

/// Test a zero fade length fails validation
#[test]
fn test_validate_withZeroFade_shouldFail() {
    let mut config = Config::default();
    config.style.fade_frames = 0;
    assert!(config.validate().is_err());
}

/// Test an out-of-range background alpha fails validation
#[test]
fn test_validate_withBadAlpha_shouldFail() {
    let mut config = Config::default();
    config.style.background_alpha = 1.5;
    assert!(config.validate().is_err());
}

/// Test a partial config file fills the gaps with defaults
#[test]
fn test_deserialize_withPartialJson_shouldUseDefaults() -> Result<()> {
    let json = r#"{ "transcription": { "endpoint": "http://example.com/transcribe/" } }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.transcription.endpoint, "http://example.com/transcribe/");
    assert_eq!(config.transcription.timeout_secs, 600);
    assert_eq!(config.style.fade_frames, 10);
    assert_eq!(config.channels.word_base, 7);

    Ok(())
}

/// Test the config round-trips through JSON
#[test]
fn test_serialize_withDefaultConfig_shouldRoundTrip() -> Result<()> {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.transcription.endpoint, config.transcription.endpoint);
    assert_eq!(parsed.channels, config.channels);
    assert_eq!(parsed.log_level, config.log_level);

    Ok(())
}
