/*!
 * Error types for the listenup crate.
 *
 * This module contains custom error types for the different collaborators the
 * core talks to, using the thiserror crate for ergonomic error definitions.
 * None of these are fatal inside the core: sink failures are logged at the
 * call site and only show up as a missing acknowledgment.
 */

use thiserror::Error;

/// Errors reported by the output collaborators (clipboard, file save, message channel)
#[derive(Error, Debug)]
pub enum SinkError {
    /// The clipboard refused or could not accept the write
    #[error("Clipboard write rejected: {0}")]
    ClipboardRejected(String),

    /// The file could not be saved
    #[error("Failed to save file '{filename}': {message}")]
    FileSave {
        /// Suggested filename of the export
        filename: String,
        /// Underlying failure
        message: String,
    },

    /// The lifecycle message channel is closed or refused the message
    #[error("Message delivery failed: {0}")]
    MessageDelivery(String),
}

/// Errors that can occur while loading subtitle entries handed over by the loader
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The entry list could not be decoded
    #[error("Failed to parse subtitle entries: {0}")]
    Parse(String),

    /// An entry carries an impossible time range
    #[error("Invalid timing for entry {id}: start {start_time}s, end {end_time}s")]
    InvalidTiming {
        /// Entry identifier
        id: String,
        /// Start offset in seconds
        start_time: f64,
        /// End offset in seconds
        end_time: f64,
    },

    /// An entry or token index is out of range
    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of available items
        len: usize,
    },
}

/// Errors raised while interpreting page locations
#[derive(Error, Debug)]
pub enum NavigationError {
    /// The location string is not a valid absolute URL
    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        /// Offending location string
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// A navigation signal line could not be understood
    #[error("Unrecognized navigation signal: {0}")]
    UnknownSignal(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from an output collaborator
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Error from subtitle handling
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from navigation handling
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
