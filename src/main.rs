// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::Write;
use std::path::PathBuf;

use listenup::app_config::{self, Config};
use listenup::app_controller::Controller;
use listenup::export::ExportFormat;
use listenup::panel::Delivery;
use listenup::subtitle::SubtitleTrack;

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Plain,
    Llm,
    Srt,
    Txt,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Plain => ExportFormat::Plain,
            CliExportFormat::Llm => ExportFormat::Llm,
            CliExportFormat::Srt => ExportFormat::Srt,
            CliExportFormat::Txt => ExportFormat::Txt,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export all subtitles (plain/llm to stdout, srt/txt to a file)
    Export {
        /// JSON array of timed entries
        #[arg(value_name = "ENTRIES_JSON")]
        entries: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: CliExportFormat,

        /// Directory for srt/txt files (defaults to the configured one)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// List the tokens of one subtitle entry
    Tokens {
        #[arg(value_name = "ENTRIES_JSON")]
        entries: PathBuf,

        /// Zero-based entry index
        #[arg(short, long)]
        entry: usize,
    },

    /// Print the explanation request for a clicked word or shift-selected phrase
    Explain {
        #[arg(value_name = "ENTRIES_JSON")]
        entries: PathBuf,

        /// Zero-based entry index
        #[arg(short, long)]
        entry: usize,

        /// Token index of the clicked word
        #[arg(short, long)]
        token: usize,

        /// Anchor token; the click is treated as a shift-click from it
        #[arg(short, long)]
        shift_from: Option<usize>,
    },

    /// Copy one subtitle entry, or a request to explain its sentence
    CopyEntry {
        #[arg(value_name = "ENTRIES_JSON")]
        entries: PathBuf,

        /// Zero-based entry index
        #[arg(short, long)]
        entry: usize,

        /// Copy the sentence explanation request instead of the entry
        #[arg(long)]
        sentence: bool,
    },

    /// Read navigation signals from stdin and print lifecycle messages
    Watch {
        /// Location of the page before the first signal
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Generate shell completions for listenup
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// ListenUp - interactive subtitle panel core
#[derive(Parser, Debug)]
#[command(name = "listenup")]
#[command(version)]
#[command(about = "Subtitle selection, export and video-change tracking")]
#[command(long_about = "ListenUp turns subtitle entries into explanation requests and exports, and tracks video changes on single-page video sites.

EXAMPLES:
    listenup export subs.json -f srt -o ./out      # Save an SRT file
    listenup export subs.json -f llm               # Print compact text for a chat model
    listenup tokens subs.json -e 3                 # Show clickable tokens of entry 3
    listenup explain subs.json -e 3 -t 4 -s 0      # Phrase request from token 0 to 4
    listenup watch -u https://www.youtube.com/     # Follow signals on stdin
    listenup completions bash > listenup.bash      # Generate bash completions

SIGNALS (watch):
    mutation <URL>    DOM mutation, optionally with the new location
    popstate <URL>    Browser back/forward
    navigate <URL>    Site navigation finished

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            // stdout carries clipboard text and lifecycle messages, so logs go to stderr
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with the most verbose level; the effective
    // level is lowered through set_max_level after the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "listenup", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Export { entries, format, output_dir } => {
            let track = SubtitleTrack::load(&entries)?;
            controller.run_export(track, format.into(), output_dir).await?;
        }
        Commands::Tokens { entries, entry } => {
            let track = SubtitleTrack::load(&entries)?;
            for row in controller.token_table(&track, entry)? {
                println!("{}", row);
            }
        }
        Commands::Explain { entries, entry, token, shift_from } => {
            let track = SubtitleTrack::load(&entries)?;
            let request = controller.explain_request(&track, entry, token, shift_from)?;
            controller.copy_text(&request).await?;
        }
        Commands::CopyEntry { entries, entry, sentence } => {
            let track = SubtitleTrack::load(&entries)?;
            if controller.run_copy_entry(track, entry, sentence).await? == Delivery::Failed {
                return Err(anyhow!("Failed to copy entry {}", entry));
            }
        }
        Commands::Watch { url } => {
            let state = controller.run_watch(url).await?;
            info!(
                "Final state: video {}, on video page: {}",
                state.current_video_id.as_deref().unwrap_or("none"),
                state.on_video_page
            );
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
