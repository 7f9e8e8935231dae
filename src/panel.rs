/*!
 * Subtitle panel state and actions.
 *
 * The panel owns the entry sequence of the current video, the active index
 * reported by the playback synchronizer, and one selection machine per entry.
 * Its actions produce text with the export formatter or the selection machine
 * and hand it to the clipboard or file-save collaborators. A failed write is
 * logged and leaves the acknowledgment hidden; nothing is propagated.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, error, info};
use parking_lot::Mutex;

use crate::errors::SubtitleError;
use crate::export::{EXPORT_MIME_TYPE, ExportFormat};
use crate::selection::{self, SelectionMachine, SelectionState, TokenStyle};
use crate::sinks::{ClipboardSink, FileSaveSink, VideoGeneration};
use crate::subtitle::{SubtitleTrack, TimedEntry};
use crate::timer::DeferredTimer;

/// What the panel body shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    Loading,
    Error(String),
    Empty,
    Ready,
}

impl PanelStatus {
    /// Status from the loader's outputs; loading wins over errors, errors over emptiness
    pub fn derive(loading: bool, error: Option<&str>, entry_count: usize) -> Self {
        match (loading, error) {
            (true, _) => Self::Loading,
            (false, Some(message)) => Self::Error(message.to_string()),
            (false, None) if entry_count == 0 => Self::Empty,
            (false, None) => Self::Ready,
        }
    }
}

/// Outcome of a panel action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The collaborator accepted the output
    Delivered,
    /// The collaborator failed; already logged
    Failed,
    /// Nothing to do (empty track, non-clickable token)
    Skipped,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Time-bounded success flag
#[derive(Debug, Clone, Default)]
pub struct Acknowledgment {
    shown: Arc<AtomicBool>,
    timer: Arc<Mutex<DeferredTimer>>,
}

impl Acknowledgment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_shown(&self) -> bool {
        self.shown.load(Ordering::SeqCst)
    }

    /// Show for `duration`, restarting the countdown if already shown
    pub fn show(&self, duration: Duration) {
        self.shown.store(true, Ordering::SeqCst);
        let shown = Arc::clone(&self.shown);
        self.timer.lock().schedule(duration, move || {
            shown.store(false, Ordering::SeqCst);
        });
    }
}

#[derive(Debug, Default)]
struct EntryView {
    selection: Arc<Mutex<SelectionMachine>>,
    highlight_timer: Mutex<DeferredTimer>,
    copy_ack: Acknowledgment,
    explain_ack: Acknowledgment,
}

/// Subtitle panel for the video on screen
#[derive(Debug)]
pub struct SubtitlePanel {
    track: SubtitleTrack,
    views: Vec<EntryView>,
    active_index: Option<usize>,
    header_ack: Acknowledgment,
    clipboard: Arc<dyn ClipboardSink>,
    files: Arc<dyn FileSaveSink>,
    ack_duration: Duration,
    generation: Option<(VideoGeneration, u64)>,
}

impl SubtitlePanel {
    pub fn new(clipboard: Arc<dyn ClipboardSink>, files: Arc<dyn FileSaveSink>, ack_duration: Duration) -> Self {
        SubtitlePanel {
            track: SubtitleTrack::default(),
            views: Vec::new(),
            active_index: None,
            header_ack: Acknowledgment::new(),
            clipboard,
            files,
            ack_duration,
            generation: None,
        }
    }

    /// Tie loaded entries to the video cache so invalidations mark them stale
    pub fn with_generation(mut self, generation: VideoGeneration) -> Self {
        let current = generation.current();
        self.generation = Some((generation, current));
        self
    }

    /// Replace the entries with a freshly loaded track
    pub fn load(&mut self, track: SubtitleTrack) {
        debug!("Panel loaded {} entries", track.len());
        self.views = track.entries.iter().map(|_| EntryView::default()).collect();
        self.track = track;
        self.active_index = None;
        if let Some((generation, captured)) = &mut self.generation {
            *captured = generation.current();
        }
    }

    /// Drop all entries and selection state
    pub fn clear(&mut self) {
        self.load(SubtitleTrack::default());
    }

    /// Whether the video cache was invalidated since the entries were loaded
    pub fn is_stale(&self) -> bool {
        self.generation
            .as_ref()
            .is_some_and(|(generation, captured)| generation.is_stale(*captured))
    }

    pub fn entries(&self) -> &[TimedEntry] {
        &self.track.entries
    }

    pub fn len(&self) -> usize {
        self.track.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }

    /// Header export buttons are disabled without entries
    pub fn exports_enabled(&self) -> bool {
        !self.is_empty()
    }

    /// Active entry reported by the playback synchronizer
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.active_index = index.filter(|i| *i < self.len());
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index == Some(index)
    }

    pub fn header_acknowledged(&self) -> bool {
        self.header_ack.is_shown()
    }

    fn view(&self, index: usize) -> Result<(&TimedEntry, &EntryView), SubtitleError> {
        let entry = self.track.entry(index)?;
        let view = self.views.get(index).ok_or(SubtitleError::IndexOutOfRange {
            index,
            len: self.views.len(),
        })?;
        Ok((entry, view))
    }

    async fn write_clipboard(&self, text: &str, what: &str) -> Delivery {
        match self.clipboard.write_text(text).await {
            Ok(()) => {
                debug!("Copied {}: {}", what, text);
                Delivery::Delivered
            }
            Err(e) => {
                error!("Copy of {} failed: {}", what, e);
                Delivery::Failed
            }
        }
    }

    /// Run an export: clipboard formats are copied, file formats are downloaded
    pub async fn export(&self, format: ExportFormat) -> Delivery {
        if format.is_clipboard() {
            self.copy_all(format).await
        } else {
            self.download(format).await
        }
    }

    /// Copy the whole track as plain or LLM text
    pub async fn copy_all(&self, format: ExportFormat) -> Delivery {
        if !self.exports_enabled() {
            return Delivery::Skipped;
        }

        let text = format.render(self.entries());
        let delivery = self.write_clipboard(&text, &format!("{} export", format)).await;
        if delivery.is_delivered() {
            info!("Copied {} subtitles ({})", self.len(), format);
            self.header_ack.show(self.ack_duration);
        }
        delivery
    }

    /// Save the whole track as an SRT or TXT file
    pub async fn download(&self, format: ExportFormat) -> Delivery {
        if !self.exports_enabled() {
            return Delivery::Skipped;
        }

        let Some(filename) = format.suggested_filename(chrono::Utc::now().timestamp_millis()) else {
            debug!("{} is not a file format", format);
            return Delivery::Skipped;
        };

        let content = format.render(self.entries());
        match self.files.save(&content, &filename, EXPORT_MIME_TYPE).await {
            Ok(path) => {
                info!("{} export saved to {:?}", format, path);
                Delivery::Delivered
            }
            Err(e) => {
                error!("{} export failed: {}", format, e);
                Delivery::Failed
            }
        }
    }

    /// Copy one entry as `MM:SS - MM:SS\ntext`
    pub async fn copy_entry(&self, index: usize) -> Result<Delivery, SubtitleError> {
        let (entry, view) = self.view(index)?;
        let text = format!("{}\n{}", entry.clock_range(), entry.text);

        let delivery = self.write_clipboard(&text, "subtitle").await;
        if delivery.is_delivered() {
            view.copy_ack.show(self.ack_duration);
        }
        Ok(delivery)
    }

    /// Copy a sentence explanation request for one entry
    pub async fn explain_entry(&self, index: usize) -> Result<Delivery, SubtitleError> {
        let (entry, view) = self.view(index)?;
        let text = selection::sentence_request(&entry.text);

        let delivery = self.write_clipboard(&text, "sentence request").await;
        if delivery.is_delivered() {
            view.explain_ack.show(self.ack_duration);
        }
        Ok(delivery)
    }

    /// Click a token of an entry, with or without shift held
    pub async fn click_token(&self, entry_index: usize, token_index: usize, shift_held: bool) -> Result<Delivery, SubtitleError> {
        let (entry, view) = self.view(entry_index)?;

        let request = view.selection.lock().interact_at(&entry.text, token_index, shift_held);
        let Some(request) = request else {
            return Ok(Delivery::Skipped);
        };

        let delivery = self.write_clipboard(&request.text, "explanation request").await;
        if delivery.is_delivered() {
            view.selection.lock().acknowledge(request.highlight);

            let selection = Arc::clone(&view.selection);
            view.highlight_timer.lock().schedule(self.ack_duration, move || {
                selection.lock().clear_highlight();
            });
        }
        Ok(delivery)
    }

    /// Global shift-key release; drops every active range
    pub fn release_shift(&self) {
        for view in &self.views {
            view.selection.lock().release_shift();
        }
    }

    pub fn selection_state(&self, index: usize) -> Result<SelectionState, SubtitleError> {
        let (_, view) = self.view(index)?;
        Ok(view.selection.lock().state())
    }

    pub fn token_styles(&self, index: usize) -> Result<Vec<TokenStyle>, SubtitleError> {
        let (entry, view) = self.view(index)?;
        Ok(view.selection.lock().token_styles(&entry.text))
    }

    pub fn copy_acknowledged(&self, index: usize) -> Result<bool, SubtitleError> {
        Ok(self.view(index)?.1.copy_ack.is_shown())
    }

    pub fn explain_acknowledged(&self, index: usize) -> Result<bool, SubtitleError> {
        Ok(self.view(index)?.1.explain_ack.is_shown())
    }
}
