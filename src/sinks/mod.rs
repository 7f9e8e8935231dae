/*!
 * Output collaborators of the core.
 *
 * The core never touches the clipboard, the file system or the extension
 * messaging layer directly. It hands text and messages to these traits:
 * - `ClipboardSink`: receives explanation requests and clipboard exports
 * - `FileSaveSink`: receives SRT/TXT export bodies
 * - `MessageChannel`: receives lifecycle messages, fire-and-forget
 * - `VideoCache`: dropped whenever the video on screen may have changed
 *
 * Concrete implementations used by the command-line host live in `stdout`,
 * `file` and `cache`; `mock` provides configurable test doubles.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::SinkError;
use crate::navigation::LifecycleMessage;

/// Write-only clipboard
#[async_trait]
pub trait ClipboardSink: Send + Sync + Debug {
    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<(), SinkError>;
}

/// File download target
#[async_trait]
pub trait FileSaveSink: Send + Sync + Debug {
    /// Save `content` under `suggested_filename`
    ///
    /// # Returns
    /// * `Result<PathBuf, SinkError>` - Where the file ended up
    async fn save(&self, content: &str, suggested_filename: &str, mime_type: &str) -> Result<PathBuf, SinkError>;
}

/// Lifecycle message channel to the extension background
#[async_trait]
pub trait MessageChannel: Send + Sync + Debug {
    /// Deliver one message; responses are not interpreted
    async fn send(&self, message: LifecycleMessage) -> Result<(), SinkError>;
}

/// Cache of the page's video element, invalidated on navigation
pub trait VideoCache: Send + Sync + Debug {
    fn clear(&self);
}

pub mod cache;
pub mod file;
pub mod mock;
pub mod stdout;

pub use self::cache::VideoGeneration;
pub use self::file::DirectorySink;
pub use self::stdout::{StdoutChannel, StdoutClipboard};
