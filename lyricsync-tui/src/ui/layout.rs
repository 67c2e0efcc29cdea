use ratatui::layout::{Constraint, Direction, Layout, Rect};

// ── Main vertical layout ────────────────────────────────────────────────────

pub const NOW_PLAYING_HEIGHT: u16 = 2;
pub const SCRUB_BAR_HEIGHT: u16 = 1;
pub const CONTENT_MIN_HEIGHT: u16 = 3;
pub const STATUS_LINE_HEIGHT: u16 = 1;
pub const HELP_BAR_HEIGHT: u16 = 1;

pub struct MainLayout {
    pub now_playing: Rect,
    pub scrub_bar: Rect,
    pub content: Rect,
    pub status_line: Rect,
    pub help_bar: Rect,
}

/// Splits the terminal into rows. In fullscreen the now-playing and scrub
/// rows collapse to zero height and the lyrics take their space.
pub fn split_main(area: Rect, fullscreen: bool) -> MainLayout {
    let (now_playing_height, scrub_bar_height) = if fullscreen {
        (0, 0)
    } else {
        (NOW_PLAYING_HEIGHT, SCRUB_BAR_HEIGHT)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(now_playing_height),
            Constraint::Length(scrub_bar_height),
            Constraint::Min(CONTENT_MIN_HEIGHT),
            Constraint::Length(STATUS_LINE_HEIGHT),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);
    MainLayout {
        now_playing: chunks[0],
        scrub_bar: chunks[1],
        content: chunks[2],
        status_line: chunks[3],
        help_bar: chunks[4],
    }
}

/// The area inside a bordered block.
pub fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

// ── Interaction constants ───────────────────────────────────────────────────

pub const PAGE_SCROLL_SIZE: usize = 10;
pub const SCROLL_WHEEL_STEPS: usize = 3;
pub const OFFSET_STEP_SECS: i32 = 1;
pub const POLL_STEP_MS: i64 = 500;

// ── Lyrics view ─────────────────────────────────────────────────────────────

pub const LYRIC_TIMESTAMP_WIDTH: usize = 6;

// ── Log view ────────────────────────────────────────────────────────────────

pub const LOG_TARGET_WIDTH: usize = 24;
pub const LOG_TARGET_SUFFIX_LEN: usize = 21;
