use crossterm::event::{KeyCode, KeyEvent};
use lyricsync_core::ClockState;
use smol_str::{SmolStr, ToSmolStr};

use crate::app::SessionView;

/// Centrally defined key actions for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    StartStop,
    PlayPause,
    SkipForward,
    SkipBackward,
    OffsetUp,
    OffsetDown,
    PollSlower,
    PollFaster,
    AutoScroll,
    Export,
    Clear,
    Fullscreen,
    Logs,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    Select,
    Back,
}

// ── Key code constants ───────────────────────────────────────────

pub const KEY_QUIT: KeyCode = KeyCode::Char('q');
pub const KEY_START_STOP: KeyCode = KeyCode::Char('s');
pub const KEY_PLAY_PAUSE: KeyCode = KeyCode::Char(' ');
pub const KEY_SKIP_BACK: KeyCode = KeyCode::Left;
pub const KEY_SKIP_BACK_ALT: KeyCode = KeyCode::Char(',');
pub const KEY_SKIP_FWD: KeyCode = KeyCode::Right;
pub const KEY_SKIP_FWD_ALT: KeyCode = KeyCode::Char('.');
pub const KEY_OFFSET_DOWN: KeyCode = KeyCode::Char('[');
pub const KEY_OFFSET_UP: KeyCode = KeyCode::Char(']');
pub const KEY_POLL_FASTER: KeyCode = KeyCode::Char('-');
pub const KEY_POLL_SLOWER: KeyCode = KeyCode::Char('=');
pub const KEY_POLL_SLOWER_ALT: KeyCode = KeyCode::Char('+');
pub const KEY_AUTO_SCROLL: KeyCode = KeyCode::Char('a');
pub const KEY_EXPORT: KeyCode = KeyCode::Char('e');
pub const KEY_CLEAR: KeyCode = KeyCode::Char('c');
pub const KEY_FULLSCREEN: KeyCode = KeyCode::Char('f');
pub const KEY_LOGS: KeyCode = KeyCode::Char('L');
pub const KEY_SELECT: KeyCode = KeyCode::Enter;
pub const KEY_BACK: KeyCode = KeyCode::Esc;
pub const KEY_UP: KeyCode = KeyCode::Up;
pub const KEY_DOWN: KeyCode = KeyCode::Down;
pub const KEY_PAGE_UP: KeyCode = KeyCode::PageUp;
pub const KEY_PAGE_DOWN: KeyCode = KeyCode::PageDown;
pub const KEY_GOTO_TOP: KeyCode = KeyCode::Home;
pub const KEY_GOTO_BOTTOM: KeyCode = KeyCode::End;

impl Action {
    /// Label shown in the help bar. Returns `None` for actions that
    /// shouldn't appear (navigation, etc.).
    pub fn help_label(&self, view: &SessionView) -> Option<(SmolStr, SmolStr)> {
        let (key, desc): (KeyCode, SmolStr) = match self {
            Action::Quit => (KEY_QUIT, "quit".into()),
            Action::StartStop => {
                let label = if view.status.is_syncing() {
                    "stop sync"
                } else {
                    "start sync"
                };
                (KEY_START_STOP, label.into())
            }
            Action::PlayPause => {
                let label = if view.clock_state == ClockState::Running {
                    "pause"
                } else {
                    "play"
                };
                (KEY_PLAY_PAUSE, label.into())
            }
            Action::SkipBackward => (KEY_SKIP_BACK_ALT, "-5s".into()),
            Action::SkipForward => (KEY_SKIP_FWD_ALT, "+5s".into()),
            Action::OffsetDown => (KEY_OFFSET_DOWN, "offset-".into()),
            Action::OffsetUp => {
                let offset = view.settings.offset_secs;
                (KEY_OFFSET_UP, format!("offset+ ({offset:+}s)").into())
            }
            Action::PollFaster => (KEY_POLL_FASTER, "poll-".into()),
            Action::PollSlower => {
                let secs = view.settings.poll_interval().as_secs_f64();
                (KEY_POLL_SLOWER, format!("poll+ ({secs:.1}s)").into())
            }
            Action::AutoScroll => {
                let state = if view.settings.auto_scroll { "on" } else { "off" };
                (KEY_AUTO_SCROLL, format!("follow ({state})").into())
            }
            Action::Export => (KEY_EXPORT, "export".into()),
            Action::Clear => (KEY_CLEAR, "clear".into()),
            Action::Fullscreen => (KEY_FULLSCREEN, "fullscreen".into()),
            Action::Logs => (KEY_LOGS, "logs".into()),
            Action::Select => (KEY_SELECT, "seek to line".into()),
            Action::Back => (KEY_BACK, "close".into()),
            _ => return None,
        };
        let key_str: SmolStr = match key {
            KeyCode::Char(' ') => "space".into(),
            KeyCode::Char(c) => c.to_smolstr(),
            other => other.to_smolstr().to_lowercase().into(),
        };
        Some((key_str, desc))
    }
}

/// Resolve a key event into an action in lyrics context.
pub fn lyrics_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_QUIT => Some(Action::Quit),
        KEY_START_STOP => Some(Action::StartStop),
        KEY_PLAY_PAUSE => Some(Action::PlayPause),
        KEY_SKIP_BACK | KEY_SKIP_BACK_ALT => Some(Action::SkipBackward),
        KEY_SKIP_FWD | KEY_SKIP_FWD_ALT => Some(Action::SkipForward),
        KEY_OFFSET_DOWN => Some(Action::OffsetDown),
        KEY_OFFSET_UP => Some(Action::OffsetUp),
        KEY_POLL_FASTER => Some(Action::PollFaster),
        KEY_POLL_SLOWER | KEY_POLL_SLOWER_ALT => Some(Action::PollSlower),
        KEY_AUTO_SCROLL => Some(Action::AutoScroll),
        KEY_EXPORT => Some(Action::Export),
        KEY_CLEAR => Some(Action::Clear),
        KEY_FULLSCREEN => Some(Action::Fullscreen),
        KEY_LOGS => Some(Action::Logs),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        KEY_SELECT => Some(Action::Select),
        KEY_BACK => Some(Action::Back),
        _ => None,
    }
}

/// Resolve a key event into an action in logs context.
pub fn logs_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KEY_BACK | KEY_LOGS | KEY_QUIT => Some(Action::Back),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        KEY_PAGE_UP => Some(Action::PageUp),
        KEY_PAGE_DOWN => Some(Action::PageDown),
        KEY_GOTO_TOP => Some(Action::GotoTop),
        KEY_GOTO_BOTTOM => Some(Action::GotoBottom),
        _ => None,
    }
}

/// Ordered list of actions to show in the lyrics help bar.
pub const LYRICS_HELP: &[Action] = &[
    Action::Quit,
    Action::StartStop,
    Action::PlayPause,
    Action::SkipBackward,
    Action::SkipForward,
    Action::OffsetDown,
    Action::OffsetUp,
    Action::PollFaster,
    Action::PollSlower,
    Action::AutoScroll,
    Action::Select,
    Action::Export,
    Action::Clear,
    Action::Fullscreen,
    Action::Logs,
];

/// Ordered list of actions to show in the logs help bar.
pub const LOGS_HELP: &[Action] = &[Action::Back, Action::MoveUp, Action::MoveDown];

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn skip_keys_have_arrow_and_punctuation_forms() {
        assert_eq!(lyrics_action(&press(KeyCode::Left)), Some(Action::SkipBackward));
        assert_eq!(lyrics_action(&press(KeyCode::Char(','))), Some(Action::SkipBackward));
        assert_eq!(lyrics_action(&press(KeyCode::Right)), Some(Action::SkipForward));
        assert_eq!(lyrics_action(&press(KeyCode::Char('.'))), Some(Action::SkipForward));
    }

    #[test]
    fn logs_close_on_their_own_key() {
        assert_eq!(logs_action(&press(KEY_LOGS)), Some(Action::Back));
        assert_eq!(logs_action(&press(KEY_START_STOP)), None);
    }

    #[test]
    fn help_labels_reflect_state() {
        let mut view = SessionView::default();
        view.settings.offset_secs = -2;
        let (key, label) = Action::OffsetUp.help_label(&view).unwrap();
        assert_eq!(key.as_str(), "]");
        assert_eq!(label.as_str(), "offset+ (-2s)");

        let (key, label) = Action::PlayPause.help_label(&view).unwrap();
        assert_eq!(key.as_str(), "space");
        assert_eq!(label.as_str(), "play");

        assert_eq!(Action::MoveUp.help_label(&view), None);
    }
}
