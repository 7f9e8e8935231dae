/*!
 * Time formatting for subtitle offsets.
 *
 * Two renditions are needed: the compact `MM:SS` clock shown next to every
 * entry and used by the plain/LLM exports, and the `HH:MM:SS,mmm` timestamp
 * used by SRT track files.
 */

// @normalizes: Negative, NaN and infinite offsets clamp to zero
fn sanitize(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Format a seconds offset as `MM:SS`.
///
/// Minutes are not wrapped into hours, so an offset of two hours renders as `120:00`.
pub fn to_clock(seconds: f64) -> String {
    let seconds = sanitize(seconds);
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;

    format!("{:02}:{:02}", minutes, secs)
}

/// Format a seconds offset as an SRT timestamp (`HH:MM:SS,mmm`).
///
/// Milliseconds are truncated, not rounded.
pub fn to_subtitle_timestamp(seconds: f64) -> String {
    let seconds = sanitize(seconds);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = seconds % 60.0;
    let millis = ((secs % 1.0) * 1000.0).floor() as u64;
    let whole_secs = secs.floor() as u64;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, whole_secs, millis)
}
