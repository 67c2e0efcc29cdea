//! Parsing and writing of LRC-style timestamped lyrics.
//!
//! A line carries zero or more `[mm:ss]`, `[mm:ss.f]`, `[mm:ss.ff]` or
//! `[mm:ss.fff]` tags. Each tag produces one [`LyricLine`] sharing the line's
//! text. Metadata tags such as `[ar:Artist]` do not match the tag grammar and
//! lines without any time tag are dropped.
use std::{fmt::Write as _, sync::LazyLock};

use regex::Regex;

/// Minutes and seconds are one or two ASCII digits, the optional fraction one
/// to three.
static TIME_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([0-9]{1,2}):([0-9]{1,2})(?:\.([0-9]{1,3}))?\]").expect("valid time tag regex")
});

const MAX_TAG_MINUTES: u64 = 99;

/// A single timed line of lyrics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LyricLine {
    /// Milliseconds from the start of the track at which the line begins.
    pub offset_ms: u64,
    /// The text of the line, never empty.
    pub text: String,
}
impl LyricLine {
    pub fn new(offset_ms: u64, text: impl Into<String>) -> Self {
        Self {
            offset_ms,
            text: text.into(),
        }
    }
}

/// Lyric lines ordered by offset. Lines that share an offset keep the order
/// in which they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    lines: Vec<LyricLine>,
}
impl Timeline {
    /// Build a timeline from lines in any order.
    pub fn new(mut lines: Vec<LyricLine>) -> Self {
        // `sort_by_key` is stable, which is what keeps equal offsets in
        // emission order.
        lines.sort_by_key(|line| line.offset_ms);
        Self { lines }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Serialize back to LRC text, one `[mm:ss.fff]text` line per entry.
    pub fn to_lrc(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.text.len() + 12).sum();
        let mut result = String::with_capacity(capacity);
        for line in &self.lines {
            write_timestamp(&mut result, line.offset_ms);
            result.push_str(&line.text);
            result.push('\n');
        }
        result
    }
}

/// Parse raw LRC text into a [`Timeline`]. Never fails: anything that isn't a
/// timed, non-empty line is skipped.
pub fn parse(raw: &str) -> Timeline {
    let mut lines = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let offsets: Vec<u64> = TIME_TAG
            .captures_iter(line)
            .filter_map(|caps| {
                let minutes: u64 = caps[1].parse().ok()?;
                let seconds: u64 = caps[2].parse().ok()?;
                let millis = caps.get(3).map_or(Some(0), |m| fraction_to_millis(m.as_str()))?;
                Some(minutes * 60_000 + seconds * 1_000 + millis)
            })
            .collect();
        if offsets.is_empty() {
            continue;
        }

        let text = TIME_TAG.replace_all(line, "");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        lines.extend(offsets.into_iter().map(|offset_ms| LyricLine::new(offset_ms, text)));
    }
    Timeline::new(lines)
}

/// `5` is half a second, not five milliseconds: pad to three digits.
fn fraction_to_millis(fraction: &str) -> Option<u64> {
    let padded = format!("{fraction:0<3}");
    padded.parse().ok()
}

/// Write `[mm:ss.fff]` for the given offset.
///
/// Minutes stop at 99 and the remainder goes into the seconds field, which
/// the tag grammar allows up to 99. Every offset [`parse`] can produce
/// (at most `[99:99.999]`) therefore writes back as a tag it accepts.
pub fn write_timestamp(result: &mut String, offset_ms: u64) {
    let minutes = (offset_ms / 60_000).min(MAX_TAG_MINUTES);
    let seconds = (offset_ms - minutes * 60_000) / 1_000;
    let millis = offset_ms % 1_000;
    let _ = write!(result, "[{minutes:02}:{seconds:02}.{millis:03}]");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(timeline: &Timeline) -> Vec<(u64, &str)> {
        timeline
            .lines()
            .iter()
            .map(|l| (l.offset_ms, l.text.as_str()))
            .collect()
    }

    #[test]
    fn equal_offsets_keep_line_order() {
        let timeline = parse("[00:12.000]Hello\n[00:15.00]World\n\n[00:12]Echo");
        assert_eq!(
            pairs(&timeline),
            vec![(12000, "Hello"), (12000, "Echo"), (15000, "World")]
        );
    }

    #[test]
    fn short_fractions_are_right_padded() {
        assert_eq!(pairs(&parse("[01:02.5]x")), vec![(62500, "x")]);
        assert_eq!(pairs(&parse("[01:02.05]x")), vec![(62050, "x")]);
        assert_eq!(pairs(&parse("[01:02.005]x")), vec![(62005, "x")]);
        assert_eq!(pairs(&parse("[1:2]x")), vec![(62000, "x")]);
    }

    #[test]
    fn multiple_tags_repeat_the_text() {
        let timeline = parse("[00:30.00][00:10.00]Chorus\n[00:20.00]Verse");
        assert_eq!(
            pairs(&timeline),
            vec![(10000, "Chorus"), (20000, "Verse"), (30000, "Chorus")]
        );
    }

    #[test]
    fn untimed_and_empty_lines_are_skipped() {
        let raw = "[ti:Song]\n[ar:Someone]\nplain text\n[00:01.00]   \n[00:02.00]  kept  \n";
        assert_eq!(pairs(&parse(raw)), vec![(2000, "kept")]);
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn malformed_tags_are_left_in_the_text() {
        // Four fraction digits and three minute digits are not time tags.
        assert!(parse("[00:01.1234]x").is_empty());
        assert!(parse("[100:01]x").is_empty());
        assert_eq!(pairs(&parse("[00:01]a [00:1.1234] b")), vec![(1000, "a [00:1.1234] b")]);
    }

    #[test]
    fn output_is_sorted_and_deterministic() {
        let raw = "[00:09]c\n[00:01]a\n[00:05]b\n[00:01]a2\n[00:09.5]d";
        let first = parse(raw);
        assert!(first.lines().windows(2).all(|w| w[0].offset_ms <= w[1].offset_ms));
        assert_eq!(first, parse(raw));
    }

    #[test]
    fn export_writes_millisecond_tags() {
        let timeline = parse("[00:01.12] test LyRiC\n[01:10.254] sssxxx");
        assert_eq!(timeline.to_lrc(), "[00:01.120]test LyRiC\n[01:10.254]sssxxx\n");
    }

    #[test]
    fn export_round_trips_offsets_and_text() {
        let raw = "[00:12.000]Hello\n[00:15.00]World\n[00:12]Echo\n[03:59.9][00:00.01]Twice, with [brackets]";
        let timeline = parse(raw);
        let reparsed = parse(&timeline.to_lrc());
        assert_eq!(reparsed, timeline);
    }

    #[test]
    fn timestamp_formatting() {
        let mut s = String::new();
        write_timestamp(&mut s, 0);
        write_timestamp(&mut s, 62_500);
        write_timestamp(&mut s, 599_999);
        assert_eq!(s, "[00:00.000][01:02.500][09:59.999]");
    }

    #[test]
    fn long_offsets_fold_into_the_seconds_field() {
        let mut s = String::new();
        write_timestamp(&mut s, 5_999_000);
        write_timestamp(&mut s, 6_000_000);
        write_timestamp(&mut s, 6_039_999);
        assert_eq!(s, "[99:59.000][99:60.000][99:99.999]");

        let timeline = parse("[99:59]a\n[99:99.999]b");
        assert_eq!(pairs(&timeline), vec![(5_999_000, "a"), (6_039_999, "b")]);
        let reparsed = parse(&timeline.to_lrc());
        assert_eq!(reparsed, timeline);
    }
}
