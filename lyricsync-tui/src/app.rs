use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use lyricsync_core::{
    self as lc, ClockState, SessionEvent, SyncSettings, SyncStatus, Timeline, TrackIdentity,
};

use crate::{
    config::Config,
    log_buffer::LogBuffer,
    ui::{logs::LogsState, lyrics::LyricsState},
};

/// Which panel/mode the UI is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Lyrics,
    Logs,
}

/// What the lyric panel should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LyricsAvailability {
    /// No track observed yet.
    Idle,
    Loading,
    Unavailable,
    Ready,
}

/// The presentation layer's copy of the session, rebuilt from events.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub identity: Option<Arc<TrackIdentity>>,
    pub timeline: Arc<Timeline>,
    pub active_index: Option<usize>,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub clock_state: ClockState,
    pub status: SyncStatus,
    pub settings: SyncSettings,
    pub no_lyrics: bool,
    pub last_sync: Option<chrono::DateTime<chrono::Local>>,
}
impl SessionView {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::IdentityChanged(identity) => {
                self.identity = Some(identity);
                self.no_lyrics = false;
            }
            SessionEvent::TimelineReplaced(timeline) => {
                if !timeline.is_empty() {
                    self.no_lyrics = false;
                }
                self.timeline = timeline;
            }
            SessionEvent::ActiveIndexChanged(index) => self.active_index = index,
            SessionEvent::ClockTick {
                position_secs,
                duration_secs,
                state,
            } => {
                self.position_secs = position_secs;
                self.duration_secs = duration_secs;
                self.clock_state = state;
            }
            SessionEvent::NoLyricsAvailable => self.no_lyrics = true,
            SessionEvent::StatusChanged(status) => self.status = status,
            SessionEvent::Synced => self.last_sync = Some(chrono::Local::now()),
            SessionEvent::SettingsChanged(settings) => self.settings = settings,
        }
    }

    pub fn lyrics_availability(&self) -> LyricsAvailability {
        if !self.timeline.is_empty() {
            LyricsAvailability::Ready
        } else if self.no_lyrics {
            LyricsAvailability::Unavailable
        } else if self.identity.is_some() {
            LyricsAvailability::Loading
        } else {
            LyricsAvailability::Idle
        }
    }
}

pub struct App {
    pub logic: lc::Logic,
    pub config: Config,
    pub config_path: PathBuf,
    pub events_rx: lc::SessionEventRx,
    pub view: SessionView,

    pub focused_panel: FocusedPanel,
    pub fullscreen: bool,
    pub should_quit: bool,
    pub needs_redraw: bool,
    /// One-line feedback for the last user action, shown in the status line.
    pub notice: Option<String>,

    pub lyrics: LyricsState,
    pub logs: LogsState,
}

impl App {
    pub fn new(config: Config, config_path: PathBuf, logic: lc::Logic, log_buffer: LogBuffer) -> Self {
        let events_rx = logic.subscribe();
        let view = SessionView::new(logic.settings());
        Self {
            logic,
            config,
            config_path,
            events_rx,
            view,

            focused_panel: FocusedPanel::Lyrics,
            fullscreen: false,
            should_quit: false,
            needs_redraw: true,
            notice: None,

            lyrics: LyricsState::new(),
            logs: LogsState::new(log_buffer),
        }
    }

    pub fn tick(&mut self) {
        // A lagged receiver errors once and then resumes on the next tick.
        while let Ok(event) = self.events_rx.try_recv() {
            if matches!(event, SessionEvent::TimelineReplaced(_)) {
                self.lyrics.reset();
            }
            self.view.apply(event);
        }

        // The clock moves on its own, so redraw every tick.
        self.needs_redraw = true;
    }

    pub fn toggle_sync(&mut self) {
        if self.view.status.is_syncing() {
            self.logic.stop();
        } else {
            self.logic.start();
        }
    }

    pub fn toggle_logs(&mut self) {
        if self.focused_panel == FocusedPanel::Logs {
            self.focused_panel = FocusedPanel::Lyrics;
        } else {
            self.focused_panel = FocusedPanel::Logs;
            self.logs.scroll_to_end();
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn adjust_offset(&mut self, delta_secs: i32) {
        let offset = self.logic.settings().offset_secs.saturating_add(delta_secs);
        self.logic.set_offset(offset);
        self.notice = Some(format!("Offset {:+}s", self.logic.settings().offset_secs));
    }

    pub fn adjust_poll_interval(&mut self, delta_ms: i64) {
        let current = self.logic.settings().poll_interval_ms;
        let interval = current.saturating_add_signed(delta_ms);
        self.logic.set_poll_interval(interval);
        let secs = self.logic.settings().poll_interval().as_secs_f64();
        self.notice = Some(format!("Polling every {secs:.1}s"));
    }

    pub fn toggle_auto_scroll(&mut self) {
        let auto_scroll = !self.logic.settings().auto_scroll;
        self.logic.set_auto_scroll(auto_scroll);
        // Following playback again drops any manual selection.
        if auto_scroll {
            self.lyrics.reset();
        }
    }

    pub fn clear_lyrics(&mut self) {
        self.logic.clear_lyrics();
        self.notice = Some("Lyrics cleared".to_string());
    }

    pub fn export_lyrics(&mut self) {
        let Some(identity) = self.view.identity.clone() else {
            self.notice = Some("Nothing is playing".to_string());
            return;
        };
        if self.view.timeline.is_empty() {
            tracing::warn!("no lyrics to export for {}", identity.display_name);
            self.notice = Some("No lyrics to export".to_string());
            return;
        }

        match export_timeline(Path::new("."), &identity.display_name, &self.view.timeline) {
            Ok(path) => {
                tracing::info!("exported lyrics to {}", path.display());
                self.notice = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("failed to export lyrics: {e:#}");
                self.notice = Some("Export failed, see logs".to_string());
            }
        }
    }

    pub fn skip(&mut self, forward: bool) {
        let delta = if forward {
            lc::SKIP_STEP_SECS
        } else {
            -lc::SKIP_STEP_SECS
        };
        self.logic.skip(delta);
    }

    pub fn seek_to_fraction(&mut self, ratio: f64) {
        if self.view.identity.is_some() {
            self.logic.seek(self.view.duration_secs * ratio.clamp(0.0, 1.0));
        }
    }

    pub fn save_state(&self) {
        let mut config = self.config.clone();
        config.sync = self.logic.settings();
        if let Err(e) = config.save(&self.config_path) {
            tracing::warn!("failed to save config: {e:#}");
        }
    }
}

/// Write `timeline` as `<name>.lrc` inside `dir`, with `name` made safe for
/// the file system.
pub fn export_timeline(dir: &Path, name: &str, timeline: &Timeline) -> anyhow::Result<PathBuf> {
    let stem = sanitize_filename::sanitize(name);
    let stem = if stem.trim().is_empty() {
        "lyrics".to_string()
    } else {
        stem
    };
    let path = dir.join(format!("{stem}.lrc"));
    std::fs::write(&path, timeline.to_lrc())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use lyricsync_core::{LyricLine, TrackId, lrc};

    use super::*;

    fn identity() -> Arc<TrackIdentity> {
        Arc::new(TrackIdentity {
            id: TrackId::from("42"),
            display_name: "Song".to_string(),
            artists: "Artist".to_string(),
            album: "Album".to_string(),
            cover_url: None,
            duration_ms: 180_000,
        })
    }

    #[test]
    fn view_tracks_lyrics_availability() {
        let mut view = SessionView::default();
        assert_eq!(view.lyrics_availability(), LyricsAvailability::Idle);

        view.apply(SessionEvent::IdentityChanged(identity()));
        view.apply(SessionEvent::TimelineReplaced(Arc::new(Timeline::empty())));
        assert_eq!(view.lyrics_availability(), LyricsAvailability::Loading);

        view.apply(SessionEvent::NoLyricsAvailable);
        assert_eq!(view.lyrics_availability(), LyricsAvailability::Unavailable);

        view.apply(SessionEvent::TimelineReplaced(Arc::new(Timeline::new(vec![
            LyricLine::new(0, "a"),
        ]))));
        assert_eq!(view.lyrics_availability(), LyricsAvailability::Ready);
    }

    #[test]
    fn view_follows_clock_and_status() {
        let mut view = SessionView::default();
        view.apply(SessionEvent::ClockTick {
            position_secs: 13.0,
            duration_secs: 180.0,
            state: ClockState::Running,
        });
        view.apply(SessionEvent::StatusChanged(SyncStatus::Connected));
        view.apply(SessionEvent::ActiveIndexChanged(Some(2)));
        view.apply(SessionEvent::Synced);

        assert_eq!(view.position_secs, 13.0);
        assert_eq!(view.clock_state, ClockState::Running);
        assert_eq!(view.status, SyncStatus::Connected);
        assert_eq!(view.active_index, Some(2));
        assert!(view.last_sync.is_some());
    }

    #[test]
    fn exported_file_parses_back() {
        let dir = std::env::temp_dir().join(format!("lyricsync-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let timeline = lrc::parse("[00:12.000]Hello\n[00:15.00]World\n\n[00:12]Echo");

        let path = export_timeline(&dir, "AC/DC: Live?", &timeline).unwrap();
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert!(path.to_string_lossy().ends_with(".lrc"));
        assert!(!path.file_name().unwrap().to_string_lossy().contains('/'));

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(lrc::parse(&written), timeline);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
