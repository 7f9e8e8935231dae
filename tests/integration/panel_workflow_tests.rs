/*!
 * Panel actions end to end against mock and directory sinks
 */

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use listenup::errors::SubtitleError;
use listenup::export::{self, ExportFormat};
use listenup::panel::{Delivery, PanelStatus, SubtitlePanel};
use listenup::selection::{phrase_request, sentence_request, word_request, SelectionState};
use listenup::sinks::mock::MockSink;
use listenup::sinks::{DirectorySink, VideoCache, VideoGeneration};
use crate::common;

const ACK: Duration = Duration::from_millis(1500);

fn mock_panel(sink: &MockSink) -> SubtitlePanel {
    let mut panel = SubtitlePanel::new(Arc::new(sink.clone()), Arc::new(sink.clone()), ACK);
    panel.load(common::sample_track());
    panel
}

/// Clipboard exports write the rendered track and flash the header
#[tokio::test(start_paused = true)]
async fn test_copy_all_withPlainAndLlm_shouldWriteRenderedTrack() {
    let sink = MockSink::working();
    let panel = mock_panel(&sink);
    let entries = common::sample_entries();

    assert_eq!(panel.export(ExportFormat::Plain).await, Delivery::Delivered);
    assert!(panel.header_acknowledged());
    assert_eq!(panel.export(ExportFormat::Llm).await, Delivery::Delivered);

    assert_eq!(sink.clipboard(), vec![export::plain(&entries), export::llm(&entries)]);

    tokio::time::sleep(ACK + Duration::from_millis(10)).await;
    assert!(!panel.header_acknowledged());
}

/// A rejected clipboard write shows no acknowledgment
#[tokio::test]
async fn test_copy_all_withFailingClipboard_shouldReportFailure() {
    let sink = MockSink::failing();
    let panel = mock_panel(&sink);

    assert_eq!(panel.copy_all(ExportFormat::Plain).await, Delivery::Failed);
    assert!(!panel.header_acknowledged());
    assert!(sink.clipboard().is_empty());
}

/// File exports land in the directory under a timestamped name
#[tokio::test]
async fn test_download_withDirectorySink_shouldWriteFile() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let sink = MockSink::working();
    let mut panel = SubtitlePanel::new(Arc::new(sink.clone()), Arc::new(DirectorySink::new(dir.path())), ACK);
    panel.load(common::sample_track());

    assert_eq!(panel.export(ExportFormat::Txt).await, Delivery::Delivered);

    let files: Vec<_> = std::fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().to_string_lossy().into_owned();
    assert!(name.starts_with("subtitles_") && name.ends_with(".txt"));
    assert_eq!(std::fs::read_to_string(files[0].path())?, export::txt(&common::sample_entries()));

    // File exports never touch the clipboard
    assert!(sink.clipboard().is_empty());
    Ok(())
}

/// Word click then shift-click produce word and phrase requests
#[tokio::test(start_paused = true)]
async fn test_click_token_withShiftExtension_shouldCopyWordThenPhrase() {
    let sink = MockSink::working();
    let panel = mock_panel(&sink);
    let text = "This is a test subtitle.";

    assert_eq!(panel.click_token(0, 2, false).await.unwrap(), Delivery::Delivered);
    assert_eq!(panel.click_token(0, 8, true).await.unwrap(), Delivery::Delivered);
    assert_eq!(
        panel.selection_state(0).unwrap(),
        SelectionState::RangeActive { anchor: 2, start: 2, end: 8 }
    );

    // Whitespace is not clickable
    assert_eq!(panel.click_token(0, 1, false).await.unwrap(), Delivery::Skipped);

    assert_eq!(
        sink.clipboard(),
        vec![word_request("is", text), phrase_request("is a test subtitle", text)]
    );

    // Other entries keep their own selection
    assert_eq!(panel.selection_state(1).unwrap(), SelectionState::Idle);
}

/// Per-entry copy and sentence actions acknowledge independently
#[tokio::test(start_paused = true)]
async fn test_entry_actions_withWorkingClipboard_shouldAcknowledgeSeparately() {
    let sink = MockSink::working();
    let panel = mock_panel(&sink);

    assert_eq!(panel.copy_entry(2).await.unwrap(), Delivery::Delivered);
    assert_eq!(panel.explain_entry(1).await.unwrap(), Delivery::Delivered);

    assert!(panel.copy_acknowledged(2).unwrap());
    assert!(!panel.explain_acknowledged(2).unwrap());
    assert!(panel.explain_acknowledged(1).unwrap());

    assert_eq!(
        sink.clipboard(),
        vec![
            "62:05 - 62:10\nFor testing (purposes), \"quoted\"!".to_string(),
            sentence_request("It contains multiple entries."),
        ]
    );
}

/// Out-of-range entries are reported rather than ignored
#[tokio::test]
async fn test_entry_actions_withBadIndex_shouldReturnIndexError() {
    let sink = MockSink::working();
    let panel = mock_panel(&sink);

    assert!(matches!(
        panel.copy_entry(3).await,
        Err(SubtitleError::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(panel.click_token(7, 0, false).await.is_err());
    assert_eq!(sink.call_count(), 0);
}

/// Every few writes fail; only the successful ones are recorded
#[tokio::test(start_paused = true)]
async fn test_copy_entry_withIntermittentClipboard_shouldOnlyAcknowledgeSuccesses() {
    let sink = MockSink::intermittent(2);
    let panel = mock_panel(&sink);

    let deliveries = vec![
        panel.copy_entry(0).await.unwrap(),
        panel.copy_entry(1).await.unwrap(),
        panel.copy_entry(2).await.unwrap(),
    ];

    assert_eq!(deliveries, vec![Delivery::Delivered, Delivery::Failed, Delivery::Delivered]);
    assert!(panel.copy_acknowledged(0).unwrap());
    assert!(!panel.copy_acknowledged(1).unwrap());
    assert_eq!(sink.clipboard().len(), 2);
}

/// Status and staleness follow the loader and the video cache
#[test]
fn test_panel_state_withCacheInvalidation_shouldBecomeStale() {
    let sink = MockSink::working();
    let generation = VideoGeneration::new();
    let mut panel = mock_panel(&sink).with_generation(generation.clone());
    panel.load(common::sample_track());

    assert_eq!(PanelStatus::derive(false, None, panel.len()), PanelStatus::Ready);
    assert!(!panel.is_stale());

    generation.clear();
    assert!(panel.is_stale());

    panel.clear();
    assert!(!panel.exports_enabled());
    assert_eq!(PanelStatus::derive(false, None, panel.len()), PanelStatus::Empty);
}
