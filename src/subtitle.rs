use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::SubtitleError;
use crate::time_format;

// @module: Subtitle entries as handed over by the page-side loader

/// Identifier of a timed entry; loaders use either numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for EntryId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

// @struct: Single timed subtitle line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEntry {
    // @field: Loader-assigned identifier
    pub id: EntryId,

    // @field: Start offset in seconds
    pub start_time: f64,

    // @field: End offset in seconds
    pub end_time: f64,

    // @field: Literal subtitle text
    pub text: String,
}

impl TimedEntry {
    /// Creates a new entry without validation
    pub fn new(id: impl Into<EntryId>, start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        TimedEntry {
            id: id.into(),
            start_time,
            end_time,
            text: text.into(),
        }
    }

    // @validates: start >= 0 and end >= start
    pub fn validate(&self) -> Result<(), SubtitleError> {
        let valid = self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.start_time >= 0.0
            && self.end_time >= self.start_time;

        if valid {
            Ok(())
        } else {
            Err(SubtitleError::InvalidTiming {
                id: self.id.to_string(),
                start_time: self.start_time,
                end_time: self.end_time,
            })
        }
    }

    /// `MM:SS - MM:SS` label shown next to the entry
    pub fn clock_range(&self) -> String {
        format!(
            "{} - {}",
            time_format::to_clock(self.start_time),
            time_format::to_clock(self.end_time)
        )
    }
}

/// Ordered subtitle sequence for one video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleTrack {
    /// Entries ordered by start time
    pub entries: Vec<TimedEntry>,
}

impl SubtitleTrack {
    /// Build a track from entries, validating timing and restoring start-time order
    pub fn from_entries(mut entries: Vec<TimedEntry>) -> Result<Self, SubtitleError> {
        for entry in &entries {
            entry.validate()?;
        }

        // Stable sort keeps loader order for equal start times
        entries.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        Ok(SubtitleTrack { entries })
    }

    /// Parse the loader's JSON array output
    pub fn from_json(json: &str) -> Result<Self, SubtitleError> {
        let entries: Vec<TimedEntry> =
            serde_json::from_str(json).map_err(|e| SubtitleError::Parse(e.to_string()))?;
        Self::from_entries(entries)
    }

    /// Read a JSON entry dump from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle entries: {:?}", path))?;
        let track = Self::from_json(&json)
            .with_context(|| format!("Invalid subtitle entries in {:?}", path))?;

        debug!("Loaded {} subtitle entries from {:?}", track.len(), path);
        Ok(track)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, or an index error
    pub fn entry(&self, index: usize) -> Result<&TimedEntry, SubtitleError> {
        self.entries.get(index).ok_or(SubtitleError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }
}
