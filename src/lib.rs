/*!
 * # ListenUp - interactive subtitle panel core
 *
 * A Rust library behind a subtitle panel overlaid on a video-streaming page.
 *
 * ## Features
 *
 * - Lossless tokenization of subtitle lines into clickable words
 * - Word and shift-extended phrase selection producing explanation requests
 * - Four export renditions of a subtitle track:
 *   - plain clipboard text
 *   - compact text for pasting into a chat model
 *   - SRT track file
 *   - TXT file
 * - Video-change detection for single-page video sites with de-duplicated
 *   lifecycle messages
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `time_format`: `MM:SS` and `HH:MM:SS,mmm` renditions of offsets
 * - `tokenizer`: word/punctuation/whitespace split
 * - `selection`: selection state machine and request templates
 * - `export`: export formats
 * - `navigation`: navigation lifecycle state machine and lifecycle messages
 * - `lifecycle`: signal-driven controller around the navigation machine
 * - `signals`: navigation signal sources and the page location
 * - `panel`: subtitle panel actions wired to the output collaborators
 * - `sinks`: clipboard, file-save, message channel and video cache interfaces
 * - `subtitle`: timed entries and tracks
 * - `timer`: resettable deferred timer
 * - `app_config`: Configuration management
 * - `app_controller`: Command-line host wiring
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod export;
pub mod lifecycle;
pub mod navigation;
pub mod panel;
pub mod selection;
pub mod signals;
pub mod sinks;
pub mod subtitle;
pub mod time_format;
pub mod timer;
pub mod tokenizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, NavigationError, SinkError, SubtitleError};
pub use export::ExportFormat;
pub use lifecycle::LifecycleController;
pub use navigation::{LifecycleEvent, LifecycleMessage, NavigationMachine, NavigationState};
pub use panel::{Delivery, SubtitlePanel};
pub use selection::{SelectionMachine, SelectionState};
pub use subtitle::{SubtitleTrack, TimedEntry};
pub use tokenizer::{tokenize, Token, TokenKind};
