use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sync settings the presentation layer may change at any time. The engine
/// reads them on every lookup and poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Signed lyric offset in seconds. Positive values delay the lyrics.
    pub offset_secs: i32,
    /// How often to ask the remote what is playing.
    pub poll_interval_ms: u64,
    /// Whether the lyric view should follow the active line.
    pub auto_scroll: bool,
    /// Where the clock starts when a new track is observed. The remote only
    /// reports *which* track is playing, not how far in it is, so this skips
    /// a typical intro.
    pub start_offset_secs: f64,
}
impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            offset_secs: 0,
            poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
            auto_scroll: true,
            start_offset_secs: Self::DEFAULT_START_OFFSET_SECS,
        }
    }
}
impl SyncSettings {
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
    pub const MIN_POLL_INTERVAL_MS: u64 = 500;
    pub const MAX_POLL_INTERVAL_MS: u64 = 60_000;
    pub const DEFAULT_START_OFFSET_SECS: f64 = 12.0;
    pub const MAX_OFFSET_SECS: i32 = 30;

    /// The poll interval, never zero.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .clamp(Self::MIN_POLL_INTERVAL_MS, Self::MAX_POLL_INTERVAL_MS),
        )
    }

    /// Copy with values pulled back into their valid ranges.
    pub fn sanitized(&self) -> Self {
        Self {
            offset_secs: self
                .offset_secs
                .clamp(-Self::MAX_OFFSET_SECS, Self::MAX_OFFSET_SECS),
            poll_interval_ms: self.poll_interval().as_millis() as u64,
            auto_scroll: self.auto_scroll,
            start_offset_secs: if self.start_offset_secs.is_finite() {
                self.start_offset_secs.max(0.0)
            } else {
                Self::DEFAULT_START_OFFSET_SECS
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.offset_secs, 0);
        assert_eq!(settings.poll_interval(), Duration::from_secs(2));
        assert!(settings.auto_scroll);
        assert_eq!(settings.start_offset_secs, 12.0);
    }

    #[test]
    fn sanitized_clamps_out_of_range_values() {
        let settings = SyncSettings {
            offset_secs: -100,
            poll_interval_ms: 0,
            auto_scroll: false,
            start_offset_secs: f64::NAN,
        }
        .sanitized();
        assert_eq!(settings.offset_secs, -SyncSettings::MAX_OFFSET_SECS);
        assert_eq!(settings.poll_interval_ms, SyncSettings::MIN_POLL_INTERVAL_MS);
        assert!(!settings.auto_scroll);
        assert_eq!(settings.start_offset_secs, SyncSettings::DEFAULT_START_OFFSET_SECS);
    }
}
