//! A simulated playback clock.
//!
//! There is no audio behind the clock: it is advanced by whoever owns it,
//! once per [`PlaybackClock::TICK_PERIOD_SECS`] of wall-clock time.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockState {
    #[default]
    Stopped,
    Running,
    Paused,
}
impl ClockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::Stopped => "Stopped",
            ClockState::Running => "Playing",
            ClockState::Paused => "Paused",
        }
    }
}
impl std::fmt::Display for ClockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    position_secs: f64,
    duration_secs: f64,
    state: ClockState,
}
impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}
impl PlaybackClock {
    /// Seconds the clock advances per tick.
    pub const TICK_PERIOD_SECS: f64 = 1.0;
    /// Duration assumed when a track reports none.
    pub const DEFAULT_DURATION_SECS: f64 = 180.0;

    pub fn new() -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: Self::DEFAULT_DURATION_SECS,
            state: ClockState::Stopped,
        }
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Start running from `initial_position_secs` on a track of
    /// `duration_secs`. A non-positive or non-finite duration falls back to
    /// [`Self::DEFAULT_DURATION_SECS`].
    pub fn start(&mut self, initial_position_secs: f64, duration_secs: f64) {
        self.duration_secs = if duration_secs.is_finite() && duration_secs > 0.0 {
            duration_secs
        } else {
            Self::DEFAULT_DURATION_SECS
        };
        self.position_secs = self.clamp(initial_position_secs);
        self.state = ClockState::Running;
    }

    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
        }
    }

    /// Flip between running and paused. A stopped clock stays stopped.
    pub fn toggle(&mut self) -> ClockState {
        match self.state {
            ClockState::Running => self.pause(),
            ClockState::Paused => self.resume(),
            ClockState::Stopped => {}
        }
        self.state
    }

    /// Jump to `target_secs`, clamped into the track, whatever the state.
    pub fn seek(&mut self, target_secs: f64) -> f64 {
        self.position_secs = self.clamp(target_secs);
        self.position_secs
    }

    pub fn skip(&mut self, delta_secs: f64) -> f64 {
        self.seek(self.position_secs + delta_secs)
    }

    /// Halt advancement. The position is kept until the next [`Self::start`].
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Advance by one tick period. Returns the new position if the clock was
    /// running; reaching the end of the track pauses the clock.
    pub fn tick(&mut self) -> Option<f64> {
        if self.state != ClockState::Running {
            return None;
        }
        self.position_secs = self.clamp(self.position_secs + Self::TICK_PERIOD_SECS);
        if self.position_secs >= self.duration_secs {
            self.position_secs = self.duration_secs;
            self.state = ClockState::Paused;
        }
        Some(self.position_secs)
    }

    fn clamp(&self, secs: f64) -> f64 {
        if secs.is_nan() {
            return 0.0;
        }
        secs.clamp(0.0, self.duration_secs)
    }
}
