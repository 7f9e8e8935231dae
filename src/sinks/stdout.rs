use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

use super::{ClipboardSink, MessageChannel};
use crate::errors::SinkError;
use crate::navigation::LifecycleMessage;

// @module: Standard output stand-ins for the command-line host

type SharedStdout = Arc<Mutex<Stdout>>;

async fn write_block(out: &SharedStdout, block: &str) -> std::io::Result<()> {
    let mut out = out.lock().await;
    out.write_all(block.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await
}

/// Prints clipboard text to stdout so it can be piped into a real clipboard tool
#[derive(Debug, Clone)]
pub struct StdoutClipboard {
    out: SharedStdout,
}

impl StdoutClipboard {
    pub fn new() -> Self {
        StdoutClipboard {
            out: Arc::new(Mutex::new(tokio::io::stdout())),
        }
    }
}

impl Default for StdoutClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardSink for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<(), SinkError> {
        write_block(&self.out, text)
            .await
            .map_err(|e| SinkError::ClipboardRejected(e.to_string()))
    }
}

/// Emits lifecycle messages as JSON lines on stdout
#[derive(Debug, Clone)]
pub struct StdoutChannel {
    out: SharedStdout,
}

impl StdoutChannel {
    pub fn new() -> Self {
        StdoutChannel {
            out: Arc::new(Mutex::new(tokio::io::stdout())),
        }
    }
}

impl Default for StdoutChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageChannel for StdoutChannel {
    async fn send(&self, message: LifecycleMessage) -> Result<(), SinkError> {
        let line = serde_json::to_string(&message)
            .map_err(|e| SinkError::MessageDelivery(e.to_string()))?;
        write_block(&self.out, &line)
            .await
            .map_err(|e| SinkError::MessageDelivery(e.to_string()))
    }
}
