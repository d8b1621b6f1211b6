/*!
 * Tests for media probing helpers
 */

use overtitle::media_probe::{MediaInfo, parse_frame_rate};

/// Test fraction frame-rate strings parse to their quotient
#[test]
fn test_parse_frame_rate_withFraction_shouldDivide() {
    let fps = parse_frame_rate("30000/1001").unwrap();
    assert!((fps - 29.97).abs() < 0.01);

    assert_eq!(parse_frame_rate("25/1"), Some(25.0));
    assert_eq!(parse_frame_rate("24000/1000"), Some(24.0));
}

/// Test plain decimal frame rates parse directly
#[test]
fn test_parse_frame_rate_withDecimal_shouldParse() {
    assert_eq!(parse_frame_rate("23.976"), Some(23.976));
    assert_eq!(parse_frame_rate(" 30 "), Some(30.0));
}

/// Test malformed frame-rate strings are rejected
#[test]
fn test_parse_frame_rate_withGarbage_shouldReturnNone() {
    assert_eq!(parse_frame_rate(""), None);
    assert_eq!(parse_frame_rate("abc"), None);
    assert_eq!(parse_frame_rate("30/0"), None);
    assert_eq!(parse_frame_rate("inf"), None);
}

/// Test probed facts synthesize a catalog-labeled canvas declaration
#[test]
fn test_to_canvas_decl_withNtscProbe_shouldNormalizeAndLabel() {
    let info = MediaInfo {
        width: 1918,
        height: 1078,
        fps: 29.97,
    };

    let decl = info.to_canvas_decl();

    assert_eq!(decl.name.as_deref(), Some("youtube"));
    // The synthesized declaration snaps to the canonical catalog pair
    assert_eq!(decl.width, 1920);
    assert_eq!(decl.height, 1080);
    assert_eq!(decl.fps, 30.0);
}
