/*!
 * Mock collaborator implementations for testing.
 *
 * `MockSink` records everything it receives and implements all output traits:
 * - `MockSink::working()` - Always accepts
 * - `MockSink::failing()` - Always rejects
 * - `MockSink::intermittent(n)` - Rejects every n-th call
 * - `MockSink::slow(ms)` - Accepts after a delay
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{ClipboardSink, FileSaveSink, MessageChannel, VideoCache};
use crate::errors::SinkError;
use crate::navigation::LifecycleMessage;

/// Behavior mode for the mock sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails
    Failing,
    /// Fails every Nth call
    Intermittent { fail_every: usize },
    /// Succeeds after a delay
    Slow { delay_ms: u64 },
}

/// A file handed to the file-save sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub content: String,
    pub filename: String,
    pub mime_type: String,
}

#[derive(Debug, Default)]
struct Recorded {
    clipboard: Vec<String>,
    files: Vec<SavedFile>,
    messages: Vec<LifecycleMessage>,
}

/// Recording test double for every output collaborator
#[derive(Debug, Clone)]
pub struct MockSink {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    cache_clears: Arc<AtomicUsize>,
    recorded: Arc<Mutex<Recorded>>,
}

impl MockSink {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            cache_clears: Arc::new(AtomicUsize::new(0)),
            recorded: Arc::new(Mutex::new(Recorded::default())),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Texts accepted by the clipboard, oldest first
    pub fn clipboard(&self) -> Vec<String> {
        self.recorded.lock().clipboard.clone()
    }

    /// Files accepted by the file-save sink
    pub fn files(&self) -> Vec<SavedFile> {
        self.recorded.lock().files.clone()
    }

    /// Messages accepted by the channel
    pub fn messages(&self) -> Vec<LifecycleMessage> {
        self.recorded.lock().messages.clone()
    }

    /// Number of video cache invalidations
    pub fn cache_clears(&self) -> usize {
        self.cache_clears.load(Ordering::SeqCst)
    }

    /// Number of sink calls, failed ones included
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    async fn gate(&self, what: &str) -> Result<(), String> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(()),
            MockBehavior::Failing => Err(format!("mock {} rejected the call", what)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(format!("mock {} failed call {}", what, count + 1))
                } else {
                    Ok(())
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(())
            }
        }
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::working()
    }
}

#[async_trait]
impl ClipboardSink for MockSink {
    async fn write_text(&self, text: &str) -> Result<(), SinkError> {
        self.gate("clipboard").await.map_err(SinkError::ClipboardRejected)?;
        self.recorded.lock().clipboard.push(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl FileSaveSink for MockSink {
    async fn save(&self, content: &str, suggested_filename: &str, mime_type: &str) -> Result<PathBuf, SinkError> {
        self.gate("file sink").await.map_err(|message| SinkError::FileSave {
            filename: suggested_filename.to_string(),
            message,
        })?;
        self.recorded.lock().files.push(SavedFile {
            content: content.to_string(),
            filename: suggested_filename.to_string(),
            mime_type: mime_type.to_string(),
        });
        Ok(PathBuf::from(suggested_filename))
    }
}

#[async_trait]
impl MessageChannel for MockSink {
    async fn send(&self, message: LifecycleMessage) -> Result<(), SinkError> {
        self.gate("channel").await.map_err(SinkError::MessageDelivery)?;
        self.recorded.lock().messages.push(message);
        Ok(())
    }
}

impl VideoCache for MockSink {
    fn clear(&self) {
        self.cache_clears.fetch_add(1, Ordering::SeqCst);
    }
}
