use lyricsync_core::{self as lc, SyncError, SyncStatus, util::format_time};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{LyricsAvailability, SessionView},
    keys::Action,
};

use super::{layout, theme};

/// Keyboard selection and scroll position of the lyric list.
#[derive(Debug, Default)]
pub struct LyricsState {
    pub selected_index: Option<usize>,
    /// First visible row as of the last draw.
    pub scroll_offset: usize,
}
impl LyricsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the manual selection so the view follows playback again.
    pub fn reset(&mut self) {
        self.selected_index = None;
    }
}

pub fn draw(
    frame: &mut Frame,
    state: &mut LyricsState,
    view: &SessionView,
    area: Rect,
    fullscreen: bool,
) {
    let title = match &view.identity {
        Some(identity) if fullscreen => format!(
            " {} - {}  {} / {} ",
            identity.display_name,
            identity.artists,
            format_time(view.position_secs),
            format_time(view.duration_secs)
        ),
        _ => " Lyrics ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let placeholder = match view.lyrics_availability() {
        LyricsAvailability::Ready => None,
        LyricsAvailability::Loading => Some("Loading lyrics...".to_string()),
        LyricsAvailability::Unavailable => Some("No lyrics available for this track.".to_string()),
        LyricsAvailability::Idle => Some(match &view.status {
            SyncStatus::Error(e @ SyncError::NotAuthenticated) => e.display_message(),
            SyncStatus::Ready => "Press s to start syncing.".to_string(),
            _ => "Waiting for a song...".to_string(),
        }),
    };
    if let Some(placeholder) = placeholder {
        let msg = Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme::DIM));
        frame.render_widget(msg, inner);
        return;
    }

    let active_index = view.active_index;
    let selected_index = state.selected_index;

    let items: Vec<ListItem> = view
        .timeline
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let is_active = active_index == Some(idx);
            let is_past = active_index.is_some_and(|active| idx < active);
            let is_selected = selected_index == Some(idx);

            let line_color = if is_selected {
                theme::SELECTED
            } else if is_active {
                theme::ACCENT
            } else if is_past {
                theme::PAST
            } else {
                theme::TEXT
            };

            let mut spans = Vec::new();
            if !fullscreen {
                spans.push(if is_selected {
                    Span::styled(
                        "> ",
                        Style::default()
                            .fg(theme::SELECTED)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                });
                spans.push(Span::styled(
                    format!(
                        "{:>width$} ",
                        format_time(line.offset_ms as f64 / 1000.0),
                        width = layout::LYRIC_TIMESTAMP_WIDTH
                    ),
                    Style::default().fg(theme::DIM),
                ));
            }

            let text_style = if is_selected || is_active {
                Style::default().fg(line_color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(line_color)
            };
            spans.push(Span::styled(line.text.as_str(), text_style));

            let line = Line::from(spans);
            ListItem::new(if fullscreen {
                line.alignment(Alignment::Center)
            } else {
                line
            })
        })
        .collect();

    // Center on the keyboard selection if there is one, otherwise on the
    // active line while following playback; else leave the scroll alone.
    let focus_line = selected_index.or(if view.settings.auto_scroll {
        active_index
    } else {
        None
    });
    if let Some(focus_line) = focus_line {
        state.scroll_offset = focus_line.saturating_sub(inner.height as usize / 2);
    }
    state.scroll_offset = state
        .scroll_offset
        .min(view.timeline.len().saturating_sub(1));

    let mut list_state = ListState::default();
    list_state.select(focus_line);
    *list_state.offset_mut() = state.scroll_offset;

    frame.render_stateful_widget(List::new(items), inner, &mut list_state);
}

pub fn handle_key(state: &mut LyricsState, view: &SessionView, logic: &lc::Logic, action: Action) {
    let line_count = view.timeline.len();
    match action {
        Action::MoveUp => move_selection(state, view, -1),
        Action::MoveDown => move_selection(state, view, 1),
        Action::PageUp => move_selection(state, view, -(layout::PAGE_SCROLL_SIZE as i32)),
        Action::PageDown => move_selection(state, view, layout::PAGE_SCROLL_SIZE as i32),
        Action::GotoTop if line_count > 0 => state.selected_index = Some(0),
        Action::GotoBottom if line_count > 0 => state.selected_index = Some(line_count - 1),
        Action::Select => seek_to_selected(state, logic),
        Action::Back => state.reset(),
        _ => {}
    }
}

/// Handle a click in the lyrics area: seek to the clicked line.
pub fn handle_mouse_click(
    state: &mut LyricsState,
    view: &SessionView,
    logic: &lc::Logic,
    area: Rect,
    y: u16,
) {
    let inner = layout::inner(area);
    if y < inner.y || y >= inner.y + inner.height {
        return;
    }
    let clicked_index = state.scroll_offset + (y - inner.y) as usize;
    if clicked_index < view.timeline.len() {
        logic.seek_to_line(clicked_index);
        state.reset();
    }
}

/// Move the selection cursor by `delta` lines, starting from the active line
/// if nothing is selected.
pub fn move_selection(state: &mut LyricsState, view: &SessionView, delta: i32) {
    let line_count = view.timeline.len();
    if line_count == 0 {
        return;
    }

    let current = state.selected_index.or(view.active_index).unwrap_or(0);
    let new_index = (current as i64 + delta as i64).clamp(0, line_count as i64 - 1) as usize;
    state.selected_index = Some(new_index);
}

fn seek_to_selected(state: &mut LyricsState, logic: &lc::Logic) {
    if let Some(selected) = state.selected_index {
        logic.seek_to_line(selected);
        // Back to following playback.
        state.reset();
    }
}
