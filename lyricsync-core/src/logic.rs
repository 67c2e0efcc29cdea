use std::{
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use tokio::{
    sync::mpsc,
    time::{Instant, Interval, MissedTickBehavior},
};

use crate::{
    SyncError, SyncSettings, SyncStatus, TrackId, TrackIdentity, TrackSource,
    clock::PlaybackClock,
    session::{SessionEventRx, TrackChange, TrackSession},
    tokio_thread::TokioThread,
};

/// How far the skip commands move the clock.
pub const SKIP_STEP_SECS: f64 = 5.0;

pub struct LogicArgs<S: TrackSource> {
    pub source: S,
    pub settings: SyncSettings,
}

/// Handle to the sync engine. Commands are fire-and-forget; results come back
/// as [`crate::SessionEvent`]s.
pub struct Logic {
    _tokio_thread: TokioThread,
    command_tx: mpsc::UnboundedSender<Command>,
    events_rx: SessionEventRx,
    settings: RwLock<SyncSettings>,
}
impl Logic {
    pub fn new<S: TrackSource>(args: LogicArgs<S>) -> std::io::Result<Self> {
        let settings = args.settings.sanitized();
        let session = TrackSession::new(settings.clone());
        let events_rx = session.subscribe();

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let tokio_thread = TokioThread::new()?;
        tokio_thread.spawn(Engine::new(Arc::new(args.source), session).run(command_rx));

        Ok(Self {
            _tokio_thread: tokio_thread,
            command_tx,
            events_rx,
            settings: RwLock::new(settings),
        })
    }

    pub fn subscribe(&self) -> SessionEventRx {
        self.events_rx.resubscribe()
    }

    pub fn settings(&self) -> SyncSettings {
        self.read_settings().clone()
    }

    pub fn start(&self) {
        self.send(Command::Start);
    }

    pub fn stop(&self) {
        self.send(Command::Stop);
    }

    pub fn toggle_playback(&self) {
        self.send(Command::TogglePlayback);
    }

    pub fn seek(&self, target_secs: f64) {
        self.send(Command::Seek(target_secs));
    }

    pub fn skip(&self, delta_secs: f64) {
        self.send(Command::Skip(delta_secs));
    }

    pub fn seek_to_line(&self, index: usize) {
        self.send(Command::SeekToLine(index));
    }

    pub fn clear_lyrics(&self) {
        self.send(Command::ClearLyrics);
    }

    pub fn set_offset(&self, offset_secs: i32) {
        self.update_settings(|s| s.offset_secs = offset_secs);
    }

    pub fn set_poll_interval(&self, poll_interval_ms: u64) {
        self.update_settings(|s| s.poll_interval_ms = poll_interval_ms);
    }

    pub fn set_auto_scroll(&self, auto_scroll: bool) {
        self.update_settings(|s| s.auto_scroll = auto_scroll);
    }
}
impl Logic {
    fn send(&self, command: Command) {
        if self.command_tx.send(command).is_err() {
            tracing::warn!("sync engine has shut down; dropping command");
        }
    }

    fn update_settings(&self, f: impl FnOnce(&mut SyncSettings)) {
        let settings = {
            let mut settings = self.write_settings();
            f(&mut settings);
            *settings = settings.sanitized();
            settings.clone()
        };
        self.send(Command::ApplySettings(settings));
    }

    fn read_settings(&self) -> RwLockReadGuard<'_, SyncSettings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_settings(&self) -> RwLockWriteGuard<'_, SyncSettings> {
        self.settings.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
enum Command {
    Start,
    Stop,
    TogglePlayback,
    Seek(f64),
    Skip(f64),
    SeekToLine(usize),
    ClearLyrics,
    ApplySettings(SyncSettings),
}

enum Completion {
    Poll {
        seq: u64,
        result: Result<Option<TrackIdentity>, SyncError>,
    },
    Lyrics {
        id: TrackId,
        result: Result<Option<String>, SyncError>,
    },
}

/// The actor that owns the session. Runs until the command channel closes.
struct Engine<S> {
    source: Arc<S>,
    session: TrackSession,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    tick: Option<Interval>,
    poll: Option<Interval>,
    issued_poll_seq: u64,
    applied_poll_seq: u64,
}
impl<S: TrackSource> Engine<S> {
    fn new(source: Arc<S>, session: TrackSession) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            source,
            session,
            completion_tx,
            completion_rx,
            tick: None,
            poll: None,
            issued_poll_seq: 0,
            applied_poll_seq: 0,
        }
    }

    async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<Command>) {
        loop {
            tokio::select! {
                command = command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(completion) = self.completion_rx.recv() => self.handle_completion(completion),
                _ = next_tick(&mut self.tick) => {
                    self.session.on_tick();
                }
                _ = next_tick(&mut self.poll) => self.spawn_poll(),
            }
        }
        tracing::debug!("sync engine stopped");
    }

    fn is_syncing(&self) -> bool {
        self.poll.is_some()
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::TogglePlayback => {
                self.session.toggle_playback();
            }
            Command::Seek(target_secs) => {
                self.session.on_seek_request(target_secs);
            }
            Command::Skip(delta_secs) => {
                self.session.on_skip_request(delta_secs);
            }
            Command::SeekToLine(index) => {
                if !self.session.seek_to_line(index) {
                    tracing::debug!("no lyric line {index} to seek to");
                }
            }
            Command::ClearLyrics => self.session.clear_lyrics(),
            Command::ApplySettings(settings) => self.apply_settings(settings),
        }
    }

    fn start(&mut self) {
        if self.is_syncing() {
            tracing::debug!("already syncing");
            return;
        }
        if !self.source.is_authenticated() {
            tracing::warn!("cannot start syncing without a login cookie");
            self.session
                .set_status(SyncStatus::Error(SyncError::NotAuthenticated));
            return;
        }

        tracing::info!("starting sync");
        self.session.set_status(SyncStatus::Connecting);
        self.session.forget_track();

        // The first poll fires immediately; the first tick one period from now.
        let mut poll = tokio::time::interval(self.session.settings().poll_interval());
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.poll = Some(poll);

        let tick_period = Duration::from_secs_f64(PlaybackClock::TICK_PERIOD_SECS);
        let mut tick = tokio::time::interval_at(Instant::now() + tick_period, tick_period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.tick = Some(tick);
    }

    fn stop(&mut self) {
        if !self.is_syncing() {
            return;
        }
        tracing::info!("stopping sync");
        self.tick = None;
        self.poll = None;
        // Anything still in flight is now stale.
        self.applied_poll_seq = self.issued_poll_seq;
        self.session.stop();
        self.session.set_status(SyncStatus::Ready);
    }

    fn apply_settings(&mut self, settings: SyncSettings) {
        let old_interval = self.session.settings().poll_interval();
        self.session.apply_settings(settings);
        let new_interval = self.session.settings().poll_interval();

        if new_interval != old_interval
            && let Some(poll) = self.poll.as_mut()
        {
            tracing::info!("poll interval is now {}ms", new_interval.as_millis());
            // Poll right away, then on the new period from there.
            let mut rescheduled = tokio::time::interval(new_interval);
            rescheduled.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *poll = rescheduled;
        }
    }

    fn spawn_poll(&mut self) {
        self.issued_poll_seq += 1;
        let seq = self.issued_poll_seq;
        let source = self.source.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_recent_track().await;
            let _ = completion_tx.send(Completion::Poll { seq, result });
        });
    }

    fn spawn_lyrics_fetch(&self, id: TrackId) {
        let source = self.source.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_lyrics(&id).await;
            let _ = completion_tx.send(Completion::Lyrics { id, result });
        });
    }

    fn handle_completion(&mut self, completion: Completion) {
        if !self.is_syncing() {
            tracing::debug!("dropping remote result that arrived after stop");
            return;
        }

        match completion {
            Completion::Poll { seq, result } => {
                if seq <= self.applied_poll_seq {
                    tracing::debug!("dropping stale poll result #{seq}");
                    return;
                }
                self.applied_poll_seq = seq;
                self.apply_poll_result(result);
            }
            Completion::Lyrics { id, result } => {
                let raw = match result {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::warn!("failed to fetch lyrics for {id}: {e}");
                        None
                    }
                };
                if let Err(e) = self.session.on_lyrics_fetched(&id, raw.as_deref()) {
                    tracing::debug!("no lyrics shown for {id}: {e}");
                }
            }
        }
    }

    fn apply_poll_result(&mut self, result: Result<Option<TrackIdentity>, SyncError>) {
        match result {
            Ok(Some(identity)) => {
                self.session.mark_synced();
                self.session.set_status(SyncStatus::Connected);
                let id = identity.id.clone();
                if self.session.on_track_observed(identity) == TrackChange::Changed {
                    self.spawn_lyrics_fetch(id);
                }
            }
            Ok(None) | Err(SyncError::NoActiveTrack) => {
                self.session.mark_synced();
                self.session.set_status(SyncStatus::NoSong);
            }
            Err(e) => {
                tracing::warn!("failed to poll recent track: {e}");
                self.session.set_status(SyncStatus::Error(e));
            }
        }
    }
}

async fn next_tick(interval: &mut Option<Interval>) -> Instant {
    match interval {
        Some(interval) => interval.tick().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{HashMap, VecDeque},
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use super::*;
    use crate::{ClockState, SessionEvent};

    const SCENARIO: &str = "[00:12.000]Hello\n[00:15.00]World\n\n[00:12]Echo";

    type PollResult = Result<Option<TrackIdentity>, SyncError>;

    /// Answers polls from a script; the last entry repeats forever.
    struct ScriptedSource {
        authenticated: bool,
        polls: Mutex<VecDeque<PollResult>>,
        lyrics: HashMap<TrackId, Result<String, SyncError>>,
        poll_count: AtomicUsize,
        lyric_fetches: Mutex<Vec<TrackId>>,
    }
    impl ScriptedSource {
        fn new(polls: Vec<PollResult>) -> Self {
            Self {
                authenticated: true,
                polls: Mutex::new(polls.into()),
                lyrics: HashMap::new(),
                poll_count: AtomicUsize::new(0),
                lyric_fetches: Mutex::new(vec![]),
            }
        }

        fn with_lyrics(mut self, id: &str, lrc: &str) -> Self {
            self.lyrics.insert(TrackId::from(id), Ok(lrc.to_string()));
            self
        }

        fn with_lyric_failure(mut self, id: &str, error: SyncError) -> Self {
            self.lyrics.insert(TrackId::from(id), Err(error));
            self
        }

        fn poll_count(&self) -> usize {
            self.poll_count.load(Ordering::SeqCst)
        }

        fn lyric_fetches(&self) -> Vec<TrackId> {
            self.lyric_fetches.lock().unwrap().clone()
        }
    }
    impl TrackSource for ScriptedSource {
        fn is_authenticated(&self) -> bool {
            self.authenticated
        }

        async fn fetch_recent_track(&self) -> PollResult {
            self.poll_count.fetch_add(1, Ordering::SeqCst);
            let mut polls = self.polls.lock().unwrap();
            if polls.len() > 1 {
                polls.pop_front().unwrap()
            } else {
                polls.front().cloned().unwrap_or(Ok(None))
            }
        }

        async fn fetch_lyrics(&self, id: &TrackId) -> Result<Option<String>, SyncError> {
            self.lyric_fetches.lock().unwrap().push(id.clone());
            self.lyrics.get(id).cloned().transpose()
        }
    }

    fn track(id: &str) -> TrackIdentity {
        TrackIdentity {
            id: TrackId::from(id),
            display_name: format!("Track {id}"),
            artists: "Artist".to_string(),
            album: "Album".to_string(),
            cover_url: None,
            duration_ms: 200_000,
        }
    }

    struct Harness {
        source: Arc<ScriptedSource>,
        command_tx: mpsc::UnboundedSender<Command>,
        events_rx: SessionEventRx,
    }
    impl Harness {
        fn spawn(source: ScriptedSource, settings: SyncSettings) -> Self {
            let source = Arc::new(source);
            let session = TrackSession::new(settings);
            let events_rx = session.subscribe();
            let (command_tx, command_rx) = mpsc::unbounded_channel();
            tokio::spawn(Engine::new(source.clone(), session).run(command_rx));
            Self {
                source,
                command_tx,
                events_rx,
            }
        }

        fn send(&self, command: Command) {
            self.command_tx.send(command).unwrap();
        }

        fn events(&mut self) -> Vec<SessionEvent> {
            std::iter::from_fn(|| self.events_rx.try_recv().ok()).collect()
        }
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    fn statuses(events: &[SessionEvent]) -> Vec<SyncStatus> {
        events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::StatusChanged(status) => Some(status.clone()),
                _ => None,
            })
            .collect()
    }

    fn last_clock(events: &[SessionEvent]) -> Option<(f64, ClockState)> {
        events.iter().rev().find_map(|e| match e {
            SessionEvent::ClockTick {
                position_secs,
                state,
                ..
            } => Some((*position_secs, *state)),
            _ => None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn start_polls_immediately_and_fetches_lyrics_once() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]).with_lyrics("1", SCENARIO);
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(10).await;

        assert_eq!(harness.source.poll_count(), 1);
        assert_eq!(harness.source.lyric_fetches(), vec![TrackId::from("1")]);
        let events = harness.events();
        assert_eq!(
            statuses(&events),
            vec![SyncStatus::Connecting, SyncStatus::Connected]
        );
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::TimelineReplaced(timeline) if timeline.len() == 3)
        ));
        assert!(events.contains(&SessionEvent::ActiveIndexChanged(Some(1))));

        // Polls at 2s and 4s see the same track; ticks move the clock to 16s.
        advance(4_000).await;
        assert_eq!(harness.source.poll_count(), 3);
        assert_eq!(harness.source.lyric_fetches().len(), 1);
        let events = harness.events();
        assert_eq!(last_clock(&events), Some((16.0, ClockState::Running)));
        assert!(events.contains(&SessionEvent::ActiveIndexChanged(Some(2))));
        assert!(statuses(&events).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn start_without_login_does_nothing() {
        let mut source = ScriptedSource::new(vec![Ok(Some(track("1")))]);
        source.authenticated = false;
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(5_000).await;

        assert_eq!(harness.source.poll_count(), 0);
        assert_eq!(
            statuses(&harness.events()),
            vec![SyncStatus::Error(SyncError::NotAuthenticated)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn track_change_resets_clock_and_fetches_new_lyrics() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1"))), Ok(Some(track("2")))])
            .with_lyrics("1", SCENARIO)
            .with_lyrics("2", "[00:01.00]Other");
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(1_500).await;
        harness.events();

        advance(1_000).await;
        assert_eq!(
            harness.source.lyric_fetches(),
            vec![TrackId::from("1"), TrackId::from("2")]
        );
        let events = harness.events();
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::IdentityChanged(identity) if identity.id == TrackId::from("2"))
        ));
        // The new track restarts at 12s, past the only line at 1s.
        assert!(events.contains(&SessionEvent::ActiveIndexChanged(None)));
        assert!(events.contains(&SessionEvent::ActiveIndexChanged(Some(0))));
        assert_eq!(last_clock(&events).map(|(p, _)| p), Some(12.0));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_failures_are_reported_and_retried() {
        let source = ScriptedSource::new(vec![
            Err(SyncError::TransientNetworkFailure {
                error: "timed out".to_string(),
            }),
            Ok(None),
            Ok(Some(track("1"))),
        ]);
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(4_500).await;

        assert_eq!(
            statuses(&harness.events()),
            vec![
                SyncStatus::Connecting,
                SyncStatus::Error(SyncError::TransientNetworkFailure {
                    error: "timed out".to_string()
                }),
                SyncStatus::NoSong,
                SyncStatus::Connected,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn lyric_fetch_failure_shows_no_lyrics_and_keeps_polling() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]).with_lyric_failure(
            "1",
            SyncError::TransientNetworkFailure {
                error: "connection reset".to_string(),
            },
        );
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(10).await;

        assert_eq!(harness.source.lyric_fetches(), vec![TrackId::from("1")]);
        let events = harness.events();
        assert!(events.contains(&SessionEvent::NoLyricsAvailable));
        assert_eq!(
            statuses(&events),
            vec![SyncStatus::Connecting, SyncStatus::Connected]
        );

        // The failure is not retried for the same track, and polling goes on.
        advance(4_000).await;
        assert_eq!(harness.source.poll_count(), 3);
        assert_eq!(harness.source.lyric_fetches().len(), 1);
        let events = harness.events();
        assert!(statuses(&events).is_empty());
        assert_eq!(last_clock(&events), Some((16.0, ClockState::Running)));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_disarms_timers_and_drops_late_results() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]).with_lyrics("1", SCENARIO);
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(1_500).await;
        harness.send(Command::Stop);
        advance(10).await;
        let events = harness.events();
        assert_eq!(statuses(&events).last(), Some(&SyncStatus::Ready));
        assert_eq!(last_clock(&events).map(|(_, s)| s), Some(ClockState::Stopped));

        let polls = harness.source.poll_count();
        advance(10_000).await;
        assert_eq!(harness.source.poll_count(), polls);
        assert!(harness.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_reloads_the_same_track() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]).with_lyrics("1", SCENARIO);
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(3_500).await;
        harness.send(Command::Stop);
        harness.send(Command::Start);
        advance(10).await;

        assert_eq!(harness.source.lyric_fetches().len(), 2);
        let events = harness.events();
        assert_eq!(last_clock(&events), Some((12.0, ClockState::Running)));
    }

    #[tokio::test(start_paused = true)]
    async fn poll_interval_change_polls_now_and_reschedules() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]);
        let harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(10).await;
        assert_eq!(harness.source.poll_count(), 1);

        harness.send(Command::ApplySettings(SyncSettings {
            poll_interval_ms: 60_000,
            ..SyncSettings::default()
        }));
        advance(10).await;
        assert_eq!(harness.source.poll_count(), 2);

        // The old 2s period is gone; the next poll waits the full new period.
        advance(59_000).await;
        assert_eq!(harness.source.poll_count(), 2);
        advance(1_100).await;
        assert_eq!(harness.source.poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_poll_interval_keeps_the_schedule() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]);
        let harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(10).await;
        harness.send(Command::ApplySettings(SyncSettings {
            offset_secs: 2,
            ..SyncSettings::default()
        }));
        advance(10).await;
        assert_eq!(harness.source.poll_count(), 1);
        advance(2_000).await;
        assert_eq!(harness.source.poll_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn user_commands_move_the_clock() {
        let source = ScriptedSource::new(vec![Ok(Some(track("1")))]).with_lyrics("1", SCENARIO);
        let mut harness = Harness::spawn(source, SyncSettings::default());

        harness.send(Command::Start);
        advance(10).await;
        harness.send(Command::Skip(SKIP_STEP_SECS));
        advance(10).await;
        assert_eq!(last_clock(&harness.events()).map(|(p, _)| p), Some(17.0));

        harness.send(Command::SeekToLine(0));
        advance(10).await;
        let events = harness.events();
        assert_eq!(last_clock(&events).map(|(p, _)| p), Some(12.0));
        assert!(events.contains(&SessionEvent::ActiveIndexChanged(Some(1))));

        harness.send(Command::TogglePlayback);
        advance(3_000).await;
        assert_eq!(
            last_clock(&harness.events()),
            Some((12.0, ClockState::Paused))
        );

        harness.send(Command::ClearLyrics);
        advance(10).await;
        let events = harness.events();
        assert!(events.contains(&SessionEvent::NoLyricsAvailable));
        assert!(events.contains(&SessionEvent::ActiveIndexChanged(None)));
    }

    #[tokio::test]
    async fn stale_poll_results_are_dropped() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let mut session = TrackSession::new(SyncSettings::default());
        session.set_status(SyncStatus::Connecting);
        let mut engine = Engine::new(source, session);
        engine.poll = Some(tokio::time::interval(Duration::from_secs(60)));

        engine.handle_completion(Completion::Poll {
            seq: 2,
            result: Ok(Some(track("2"))),
        });
        engine.handle_completion(Completion::Poll {
            seq: 1,
            result: Ok(Some(track("1"))),
        });
        assert_eq!(
            engine.session.identity().map(|i| i.id.clone()),
            Some(TrackId::from("2"))
        );
    }

    #[test]
    fn logic_reports_missing_login_and_tracks_settings() {
        let mut source = ScriptedSource::new(vec![]);
        source.authenticated = false;
        let logic = Logic::new(LogicArgs {
            source,
            settings: SyncSettings::default(),
        })
        .unwrap();
        let mut events = logic.subscribe();

        logic.set_offset(99);
        assert_eq!(logic.settings().offset_secs, SyncSettings::MAX_OFFSET_SECS);
        logic.start();

        let mut saw_settings = false;
        loop {
            match events.blocking_recv().unwrap() {
                SessionEvent::SettingsChanged(settings) => {
                    assert_eq!(settings.offset_secs, SyncSettings::MAX_OFFSET_SECS);
                    saw_settings = true;
                }
                SessionEvent::StatusChanged(status) => {
                    assert_eq!(status, SyncStatus::Error(SyncError::NotAuthenticated));
                    break;
                }
                _ => {}
            }
        }
        assert!(saw_settings);
    }
}
