//! Duration rendering for time-valued flags.

use std::time::Duration;

/// Render `d` as `HH:MM:S.ffffff`.
///
/// Hours and minutes are zero-padded to two digits (hours widen past 99),
/// seconds are not padded, and the fraction always carries six digits. The
/// value is rounded to the nearest microsecond first so the fields never
/// disagree after a carry.
pub fn format_duration(d: Duration) -> String {
    let total_micros = (d.as_nanos() + 500) / 1_000;
    let micros = total_micros % 1_000_000;
    let total_secs = total_micros / 1_000_000;
    let secs = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = total_secs / 3_600;
    format!("{hours:02}:{minutes:02}:{secs}.{micros:06}")
}
