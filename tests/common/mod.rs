/*!
 * Common test utilities for the listenup test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use listenup::subtitle::{SubtitleTrack, TimedEntry};

/// Routes crate logs to the test harness; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Three entries with ids that do not match their positions
pub fn sample_entries() -> Vec<TimedEntry> {
    vec![
        TimedEntry::new(30u64, 1.0, 4.0, "This is a test subtitle."),
        TimedEntry::new("intro", 5.0, 9.5, "It contains multiple entries."),
        TimedEntry::new(10u64, 3725.5, 3730.25, "For testing (purposes), \"quoted\"!"),
    ]
}

pub fn sample_track() -> SubtitleTrack {
    SubtitleTrack::from_entries(sample_entries()).expect("sample entries are valid")
}

/// Writes the sample entries as loader JSON into `dir`
pub fn create_entries_file(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"[
  {"id": 30, "startTime": 1.0, "endTime": 4.0, "text": "This is a test subtitle."},
  {"id": "intro", "startTime": 5.0, "endTime": 9.5, "text": "It contains multiple entries."},
  {"id": 10, "startTime": 3725.5, "endTime": 3730.25, "text": "For testing (purposes), \"quoted\"!"}
]"#;
    let path = dir.join(filename);
    fs::write(&path, content)?;
    Ok(path)
}

/// Deterministic pseudo-random text built from an alphabet heavy in separators
pub fn generated_texts(count: usize) -> Vec<String> {
    const ALPHABET: &[char] = &[
        'a', 'b', 'Z', 'é', '字', '\'', '-', ' ', ' ', '\t', '\n', '.', ',', '!', '?', ';', ':', '(', ')', '"',
    ];
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    (0..count)
        .map(|_| {
            let len = (next() % 40) as usize;
            (0..len)
                .map(|_| ALPHABET[(next() % ALPHABET.len() as u64) as usize])
                .collect()
        })
        .collect()
}
