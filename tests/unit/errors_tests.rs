/*!
 * Tests for error types and conversions
 */

use listenup::errors::{AppError, NavigationError, SinkError, SubtitleError};
use listenup::navigation::WatchRoute;
use std::error::Error;

/// Sink errors name what failed
#[test]
fn test_sink_error_withFileSave_shouldDisplayFilename() {
    let error = SinkError::FileSave {
        filename: "subtitles_1.srt".to_string(),
        message: "disk full".to_string(),
    };
    assert_eq!(error.to_string(), "Failed to save file 'subtitles_1.srt': disk full");
}

/// Sub-errors convert into AppError and keep their message
#[test]
fn test_app_error_fromSubErrors_shouldWrap() {
    let error: AppError = SubtitleError::IndexOutOfRange { index: 4, len: 3 }.into();
    assert!(matches!(error, AppError::Subtitle(_)));
    assert_eq!(error.to_string(), "Subtitle error: Index 4 out of range (length 3)");

    let error: AppError = SinkError::ClipboardRejected("denied".to_string()).into();
    assert!(matches!(error, AppError::Sink(_)));

    let error: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, AppError::File(_)));

    let error: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(error.to_string(), "Unknown error: boom");
}

/// Invalid URLs keep the parser error as source
#[test]
fn test_navigation_error_withInvalidUrl_shouldExposeSource() {
    let error = WatchRoute::default().classify_href("::nope").unwrap_err();
    assert!(matches!(error, NavigationError::InvalidUrl { .. }));
    assert!(error.source().is_some());
    assert!(error.to_string().contains("::nope"));
}
