use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{keys::Action, log_buffer::LogBuffer};

use super::{layout, theme};

pub struct LogsState {
    pub log_buffer: LogBuffer,
    pub scroll_offset: usize,
}

pub enum LogsAction {
    ToggleLogs,
}

impl LogsState {
    pub fn new(log_buffer: LogBuffer) -> Self {
        Self {
            log_buffer,
            scroll_offset: 0,
        }
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_offset = self.log_buffer.len().saturating_sub(1);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max_offset = self.log_buffer.len().saturating_sub(1);
        self.scroll_offset = self
            .scroll_offset
            .saturating_add_signed(delta as isize)
            .min(max_offset);
    }
}

pub fn draw(frame: &mut Frame, logs: &mut LogsState, area: Rect) {
    let entries = logs.log_buffer.get_entries();

    let block = Block::default()
        .title(format!(" Logs ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        let empty = Paragraph::new("No log entries").style(Style::default().fg(theme::DIM));
        frame.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            // Keep semantic colors for log levels.
            let (level_str, level_color) = match entry.level {
                tracing::Level::ERROR => ("ERR", Color::Red),
                tracing::Level::WARN => ("WRN", Color::Yellow),
                tracing::Level::INFO => ("INF", Color::Cyan),
                tracing::Level::DEBUG => ("DBG", Color::Green),
                tracing::Level::TRACE => ("TRC", theme::DIM),
            };

            let target = if entry.target.len() > layout::LOG_TARGET_WIDTH {
                let start = entry
                    .target
                    .char_indices()
                    .map(|(i, _)| i)
                    .find(|&i| entry.target.len() - i <= layout::LOG_TARGET_SUFFIX_LEN)
                    .unwrap_or(0);
                format!("...{}", &entry.target[start..])
            } else {
                entry.target.clone()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.time.format("%H:%M:%S").to_string(),
                    Style::default().fg(theme::DIM),
                ),
                Span::raw(" "),
                Span::styled(
                    level_str,
                    Style::default()
                        .fg(level_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{target:width$}", width = layout::LOG_TARGET_WIDTH),
                    Style::default().fg(theme::DIM),
                ),
                Span::raw(" "),
                Span::styled(entry.message.as_str(), Style::default().fg(theme::TEXT)),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(theme::HIGHLIGHT_BG)
            .add_modifier(Modifier::BOLD),
    );

    // Clamp scroll offset to valid range.
    logs.scroll_offset = logs.scroll_offset.min(entries.len().saturating_sub(1));

    let mut state = ListState::default();
    state.select(Some(logs.scroll_offset));
    frame.render_stateful_widget(list, inner, &mut state);
}

pub fn handle_key(logs: &mut LogsState, action: Action) -> Option<LogsAction> {
    match action {
        Action::Back => return Some(LogsAction::ToggleLogs),
        Action::MoveUp => logs.scroll_by(-1),
        Action::MoveDown => logs.scroll_by(1),
        Action::PageUp => logs.scroll_by(-(layout::PAGE_SCROLL_SIZE as i32)),
        Action::PageDown => logs.scroll_by(layout::PAGE_SCROLL_SIZE as i32),
        Action::GotoTop => logs.scroll_offset = 0,
        Action::GotoBottom => logs.scroll_to_end(),
        _ => {}
    }
    None
}
