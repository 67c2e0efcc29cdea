//! Finding the lyric line that is active at a point in time.
use crate::lrc::LyricLine;

/// Convert a clock position into the lyric time to look up.
///
/// A positive `offset_secs` makes the query earlier, so lyrics show up later
/// relative to the clock.
pub fn query_millis(position_secs: f64, offset_secs: i32) -> i64 {
    ((position_secs - f64::from(offset_secs)) * 1000.0).round() as i64
}

/// Return the index of the line whose window `[line.offset, next.offset)`
/// contains `query_ms`. The last line's window is open-ended. Returns `None`
/// for an empty timeline or a query before the first line.
///
/// When several lines share an offset, the last of them owns the window,
/// since the earlier ones have zero-width windows.
pub fn locate(lines: &[LyricLine], query_ms: i64) -> Option<usize> {
    if query_ms < 0 {
        return None;
    }
    let query_ms = query_ms as u64;
    // Number of lines starting at or before the query; the active line is the
    // last of those.
    let started = lines.partition_point(|line| line.offset_ms <= query_ms);
    started.checked_sub(1)
}
