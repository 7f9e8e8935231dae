use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::Config;
use crate::export::ExportFormat;
use crate::lifecycle::LifecycleController;
use crate::navigation::{NavigationMachine, NavigationState};
use crate::panel::{Delivery, SubtitlePanel};
use crate::selection::SelectionMachine;
use crate::signals::{LocationProvider, SharedLocation, SignalSource, StdinSignalSource};
use crate::sinks::{ClipboardSink, DirectorySink, FileSaveSink, MessageChannel, StdoutChannel, StdoutClipboard, VideoCache, VideoGeneration};
use crate::subtitle::SubtitleTrack;
use crate::tokenizer::{self, TokenKind};

// @module: Application controller wiring configuration, collaborators and the core

/// Main application controller for the command-line host
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Panel wired to the given collaborators with the configured acknowledgment time
    pub fn panel(&self, clipboard: Arc<dyn ClipboardSink>, files: Arc<dyn FileSaveSink>) -> SubtitlePanel {
        SubtitlePanel::new(clipboard, files, self.config.timing.acknowledgment())
    }

    /// Lifecycle controller wired to the given collaborators with the configured route and settle delay
    pub fn lifecycle(
        &self,
        location: Arc<dyn LocationProvider>,
        cache: Arc<dyn VideoCache>,
        channel: Arc<dyn MessageChannel>,
    ) -> LifecycleController {
        LifecycleController::new(
            NavigationMachine::new(self.config.navigation.route()),
            location,
            cache,
            channel,
            self.config.timing.navigation_settle(),
        )
    }

    /// Export a track; clipboard formats go to stdout, file formats to the output directory
    pub async fn run_export(&self, track: SubtitleTrack, format: ExportFormat, output_dir: Option<PathBuf>) -> Result<Delivery> {
        let dir = output_dir.unwrap_or_else(|| self.config.export.resolved_output_dir());
        debug!("Exporting {} entries as {} (output dir {:?})", track.len(), format, dir);

        let mut panel = self.panel(Arc::new(StdoutClipboard::new()), Arc::new(DirectorySink::new(dir)));
        panel.load(track);

        let delivery = panel.export(format).await;
        match delivery {
            Delivery::Delivered => Ok(delivery),
            Delivery::Skipped => {
                info!("No subtitles to export");
                Ok(delivery)
            }
            Delivery::Failed => Err(anyhow!("{} export failed", format)),
        }
    }

    /// Tab-separated token listing (`index`, `kind`, `text`) of one entry
    pub fn token_table(&self, track: &SubtitleTrack, entry: usize) -> Result<Vec<String>> {
        let entry = track.entry(entry)?;
        let rows = tokenizer::tokenize(&entry.text)
            .iter()
            .map(|token| {
                let kind = match token.kind {
                    TokenKind::Word if token.is_addressable() => "word",
                    TokenKind::Word => "skip",
                    TokenKind::Punctuation => "punct",
                    TokenKind::Whitespace => "space",
                };
                format!("{}\t{}\t{:?}", token.index, kind, token.display_form())
            })
            .collect();
        Ok(rows)
    }

    /// Build the explanation request for a token click, optionally shift-extended from an anchor
    pub fn explain_request(&self, track: &SubtitleTrack, entry: usize, token: usize, shift_from: Option<usize>) -> Result<String> {
        let entry = track.entry(entry)?;
        let mut machine = SelectionMachine::new();

        if let Some(anchor) = shift_from {
            machine
                .interact_at(&entry.text, anchor, false)
                .ok_or_else(|| anyhow!("Token {} is not a clickable word", anchor))?;
        }

        let request = machine
            .interact_at(&entry.text, token, shift_from.is_some())
            .ok_or_else(|| anyhow!("Token {} is not a clickable word", token))?;

        Ok(request.text)
    }

    /// Write text to the stdout clipboard
    pub async fn copy_text(&self, text: &str) -> Result<()> {
        StdoutClipboard::new()
            .write_text(text)
            .await
            .context("Failed to write clipboard text")
    }

    /// Copy one entry or its sentence explanation request
    pub async fn run_copy_entry(&self, track: SubtitleTrack, entry: usize, sentence: bool) -> Result<Delivery> {
        let files: Arc<dyn FileSaveSink> = Arc::new(DirectorySink::new(self.config.export.resolved_output_dir()));
        let mut panel = self.panel(Arc::new(StdoutClipboard::new()), files);
        panel.load(track);

        let delivery = if sentence {
            panel.explain_entry(entry).await?
        } else {
            panel.copy_entry(entry).await?
        };
        Ok(delivery)
    }

    /// Follow navigation signals on stdin and print lifecycle messages as JSON lines
    pub async fn run_watch(&self, initial_url: Option<String>) -> Result<NavigationState> {
        let location = SharedLocation::new(initial_url.unwrap_or_default());
        let mut source = StdinSignalSource::stdin(location.clone());
        self.run_watch_with(location, &mut source, Arc::new(StdoutChannel::new())).await
    }

    /// Follow navigation signals from any source
    pub async fn run_watch_with<S: SignalSource>(
        &self,
        location: SharedLocation,
        source: &mut S,
        channel: Arc<dyn MessageChannel>,
    ) -> Result<NavigationState> {
        let generation = VideoGeneration::new();
        let mut lifecycle = self.lifecycle(Arc::new(location), Arc::new(generation.clone()), channel);

        info!("Watching navigation signals (settle delay {:?})", lifecycle.settle_delay());
        lifecycle.run(source).await;

        if generation.current() == 0 {
            info!("No video page was detected");
        } else {
            debug!("Video cache invalidated {} times", generation.current());
        }

        Ok(lifecycle.state().clone())
    }
}
