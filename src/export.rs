/*!
 * Export renditions of a subtitle track.
 *
 * All four formats are pure functions of the entry sequence. Delivering the
 * result (clipboard or file save) is up to the caller.
 */

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::subtitle::TimedEntry;
use crate::time_format::{to_clock, to_subtitle_timestamp};

// @const: MIME type passed to the file-save sink
pub const EXPORT_MIME_TYPE: &str = "text/plain;charset=utf-8";

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Timed blocks separated by a blank line, for the clipboard
    Plain,
    /// Timed blocks without blank lines, for pasting into a chat model
    Llm,
    /// Numbered SRT track file
    Srt,
    /// Plain text file
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Plain, Self::Llm, Self::Srt, Self::Txt];

    /// Render `entries` in this format
    pub fn render(&self, entries: &[TimedEntry]) -> String {
        match self {
            Self::Plain => plain(entries),
            Self::Llm => llm(entries),
            Self::Srt => srt(entries),
            Self::Txt => txt(entries),
        }
    }

    /// File extension, for formats that are saved as files
    pub fn file_extension(&self) -> Option<&'static str> {
        match self {
            Self::Srt => Some("srt"),
            Self::Txt => Some("txt"),
            Self::Plain | Self::Llm => None,
        }
    }

    /// Whether the format goes to the clipboard rather than a file
    pub fn is_clipboard(&self) -> bool {
        self.file_extension().is_none()
    }

    /// `subtitles_{epoch-millis}.{ext}` for file formats
    pub fn suggested_filename(&self, epoch_millis: i64) -> Option<String> {
        self.file_extension()
            .map(|ext| format!("subtitles_{}.{}", epoch_millis, ext))
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Llm => "llm",
            Self::Srt => "srt",
            Self::Txt => "txt",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "llm" => Ok(Self::Llm),
            "srt" => Ok(Self::Srt),
            "txt" => Ok(Self::Txt),
            _ => Err(anyhow!("Invalid export format: {}", s)),
        }
    }
}

fn clock_block(entry: &TimedEntry) -> String {
    format!(
        "{} - {}\n{}",
        to_clock(entry.start_time),
        to_clock(entry.end_time),
        entry.text
    )
}

/// Blocks of `MM:SS - MM:SS\ntext` separated by a blank line
pub fn plain(entries: &[TimedEntry]) -> String {
    entries.iter().map(clock_block).collect::<Vec<_>>().join("\n\n")
}

/// Same blocks as [`plain`], separated by a single newline
pub fn llm(entries: &[TimedEntry]) -> String {
    entries.iter().map(clock_block).collect::<Vec<_>>().join("\n")
}

/// SRT track body numbered from 1 in input order
pub fn srt(entries: &[TimedEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                index + 1,
                to_subtitle_timestamp(entry.start_time),
                to_subtitle_timestamp(entry.end_time),
                entry.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text file body, identical to [`plain`]
pub fn txt(entries: &[TimedEntry]) -> String {
    plain(entries)
}
