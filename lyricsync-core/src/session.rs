//! The state of one sync session: which track is playing, its lyrics, and
//! where the simulated clock is.
//!
//! [`TrackSession`] is owned by a single writer (the engine actor, or a test).
//! Observers never touch it directly; they subscribe to [`SessionEvent`]s.
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    SyncError, SyncSettings, SyncStatus, TrackId, TrackIdentity,
    clock::{ClockState, PlaybackClock},
    locate, lrc,
    lrc::Timeline,
};

pub type SessionEventRx = broadcast::Receiver<SessionEvent>;

/// Plain data describing a change the presentation layer may want to render.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    IdentityChanged(Arc<TrackIdentity>),
    TimelineReplaced(Arc<Timeline>),
    ActiveIndexChanged(Option<usize>),
    ClockTick {
        position_secs: f64,
        duration_secs: f64,
        state: ClockState,
    },
    NoLyricsAvailable,
    StatusChanged(SyncStatus),
    /// The remote answered a poll.
    Synced,
    SettingsChanged(SyncSettings),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackChange {
    /// The observed track is the one already held.
    Unchanged,
    /// A different track was observed and the session was reset; its lyrics
    /// should be fetched.
    Changed,
}

pub struct TrackSession {
    identity: Option<Arc<TrackIdentity>>,
    timeline: Arc<Timeline>,
    clock: PlaybackClock,
    active_index: Option<usize>,
    settings: SyncSettings,
    status: SyncStatus,
    events_tx: broadcast::Sender<SessionEvent>,
}
impl TrackSession {
    const EVENT_CAPACITY: usize = 256;

    pub fn new(settings: SyncSettings) -> Self {
        let (events_tx, _) = broadcast::channel(Self::EVENT_CAPACITY);
        Self {
            identity: None,
            timeline: Arc::new(Timeline::empty()),
            clock: PlaybackClock::new(),
            active_index: None,
            settings: settings.sanitized(),
            status: SyncStatus::Ready,
            events_tx,
        }
    }

    pub fn subscribe(&self) -> SessionEventRx {
        self.events_tx.subscribe()
    }

    pub fn identity(&self) -> Option<&Arc<TrackIdentity>> {
        self.identity.as_ref()
    }

    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// Reconcile with the track the remote reports. Only a different track ID
    /// resets the session; metadata changes on the same ID are ignored.
    pub fn on_track_observed(&mut self, identity: TrackIdentity) -> TrackChange {
        if self
            .identity
            .as_ref()
            .is_some_and(|current| current.is_same_track(&identity))
        {
            return TrackChange::Unchanged;
        }

        tracing::info!(
            "now playing {} - {} ({})",
            identity.artists,
            identity.display_name,
            identity.id
        );
        let identity = Arc::new(identity);
        self.identity = Some(identity.clone());
        self.emit(SessionEvent::IdentityChanged(identity.clone()));

        self.replace_timeline(Timeline::empty());
        self.clock
            .start(self.settings.start_offset_secs, identity.duration_secs());
        self.emit_clock();
        self.set_active_index(None);

        TrackChange::Changed
    }

    /// Install lyrics fetched for `for_id` and return how many lines were
    /// installed. `raw` is `None` when the remote had nothing (or the fetch
    /// failed).
    ///
    /// # Errors
    ///
    /// [`SyncError::StaleResult`] if `for_id` is not the current track; the
    /// session is left untouched. [`SyncError::LyricsUnavailable`] if there
    /// were no timed lines; the session is moved to the empty lyric state.
    pub fn on_lyrics_fetched(
        &mut self,
        for_id: &TrackId,
        raw: Option<&str>,
    ) -> Result<usize, SyncError> {
        if self.identity.as_ref().is_none_or(|current| &current.id != for_id) {
            tracing::debug!("discarding stale lyrics for {for_id}");
            return Err(SyncError::StaleResult);
        }

        let timeline = raw.map(lrc::parse).unwrap_or_default();
        if timeline.is_empty() {
            tracing::info!("no lyrics available for {for_id}");
            self.replace_timeline(timeline);
            self.set_active_index(None);
            self.emit(SessionEvent::NoLyricsAvailable);
            return Err(SyncError::LyricsUnavailable);
        }

        let line_count = timeline.len();
        tracing::info!("installed {line_count} lyric lines for {for_id}");
        self.replace_timeline(timeline);
        self.recompute_active_index();
        Ok(line_count)
    }

    /// Advance the clock by one tick and follow it with the active line.
    pub fn on_tick(&mut self) -> Option<f64> {
        let position = self.clock.tick()?;
        self.emit_clock();
        self.recompute_active_index();
        Some(position)
    }

    pub fn on_seek_request(&mut self, target_secs: f64) -> f64 {
        let position = self.clock.seek(target_secs);
        self.emit_clock();
        self.recompute_active_index();
        position
    }

    pub fn on_skip_request(&mut self, delta_secs: f64) -> f64 {
        let position = self.clock.skip(delta_secs);
        self.emit_clock();
        self.recompute_active_index();
        position
    }

    /// Seek so that line `index` becomes active, taking the offset into
    /// account. Returns `false` if there is no such line.
    pub fn seek_to_line(&mut self, index: usize) -> bool {
        let Some(line) = self.timeline.get(index) else {
            return false;
        };
        let target = line.offset_ms as f64 / 1000.0 + f64::from(self.settings.offset_secs);
        self.on_seek_request(target);
        true
    }

    pub fn toggle_playback(&mut self) -> ClockState {
        let state = self.clock.toggle();
        self.emit_clock();
        state
    }

    pub fn clear_lyrics(&mut self) {
        self.replace_timeline(Timeline::empty());
        self.set_active_index(None);
        self.emit(SessionEvent::NoLyricsAvailable);
    }

    /// Replace the settings. A changed offset takes effect immediately.
    pub fn apply_settings(&mut self, settings: SyncSettings) {
        let settings = settings.sanitized();
        if settings == self.settings {
            return;
        }
        let offset_changed = settings.offset_secs != self.settings.offset_secs;
        self.settings = settings;
        self.emit(SessionEvent::SettingsChanged(self.settings.clone()));
        if offset_changed {
            self.recompute_active_index();
        }
    }

    pub fn set_status(&mut self, status: SyncStatus) {
        if status != self.status {
            self.status = status.clone();
            self.emit(SessionEvent::StatusChanged(status));
        }
    }

    /// Forget the held track so the next observation counts as a change,
    /// even if it is the same track. Nothing is emitted.
    pub fn forget_track(&mut self) {
        self.identity = None;
    }

    pub fn mark_synced(&self) {
        self.emit(SessionEvent::Synced);
    }

    /// Stop the clock. Identity and lyrics stay until the next track change.
    pub fn stop(&mut self) {
        self.clock.stop();
        self.emit_clock();
    }

    /// The current lyrics as LRC text, or `None` if there are none.
    pub fn export_lyrics(&self) -> Option<String> {
        (!self.timeline.is_empty()).then(|| self.timeline.to_lrc())
    }
}
impl TrackSession {
    fn recompute_active_index(&mut self) {
        let query_ms = locate::query_millis(self.clock.position_secs(), self.settings.offset_secs);
        let index = locate::locate(self.timeline.lines(), query_ms);
        self.set_active_index(index);
    }

    fn set_active_index(&mut self, index: Option<usize>) {
        if index != self.active_index {
            self.active_index = index;
            self.emit(SessionEvent::ActiveIndexChanged(index));
        }
    }

    fn replace_timeline(&mut self, timeline: Timeline) {
        self.timeline = Arc::new(timeline);
        self.emit(SessionEvent::TimelineReplaced(self.timeline.clone()));
    }

    fn emit_clock(&self) {
        self.emit(SessionEvent::ClockTick {
            position_secs: self.clock.position_secs(),
            duration_secs: self.clock.duration_secs(),
            state: self.clock.state(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events_tx.send(event);
    }
}
