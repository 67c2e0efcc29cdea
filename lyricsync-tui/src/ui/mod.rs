pub(crate) mod layout;
pub(crate) mod logs;
pub(crate) mod lyrics;
pub(crate) mod now_playing;

use lyricsync_core::{ClockState, SyncStatus, util::format_time};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};
use unicode_width::{UnicodeWidthChar as _, UnicodeWidthStr as _};

use crate::{
    app::{App, FocusedPanel, SessionView},
    keys,
};

/// Colors shared by every panel.
pub mod theme {
    use ratatui::style::Color;

    pub const TEXT: Color = Color::Rgb(220, 220, 220);
    pub const DIM: Color = Color::Rgb(128, 128, 128);
    pub const PAST: Color = Color::Rgb(150, 150, 150);
    pub const ACCENT: Color = Color::Rgb(236, 65, 65);
    pub const SELECTED: Color = Color::Rgb(255, 200, 120);
    pub const BORDER: Color = Color::Rgb(90, 90, 110);
    pub const HIGHLIGHT_BG: Color = Color::Rgb(50, 50, 70);
    pub const GAUGE_BG: Color = Color::Rgb(30, 30, 30);
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // [NowPlaying] | [Scrub] | [Lyrics/Logs] | [Status] | [Help]
    let main = layout::split_main(size, app.fullscreen);

    if !app.fullscreen {
        now_playing::draw(frame, &app.view, main.now_playing);
        draw_scrub_bar(frame, &app.view, main.scrub_bar);
    }

    match app.focused_panel {
        FocusedPanel::Lyrics => lyrics::draw(
            frame,
            &mut app.lyrics,
            &app.view,
            main.content,
            app.fullscreen,
        ),
        FocusedPanel::Logs => logs::draw(frame, &mut app.logs, main.content),
    }

    draw_status_line(frame, app, main.status_line);
    draw_help_bar(frame, app, main.help_bar);
}

fn draw_scrub_bar(frame: &mut Frame, view: &SessionView, area: Rect) {
    let icon = match view.clock_state {
        ClockState::Running => "\u{25B6}",
        ClockState::Paused => "\u{23F8}",
        ClockState::Stopped => "\u{25A0}",
    };
    let label = format!(
        " {icon} {} / {} ",
        format_time(view.position_secs),
        format_time(view.duration_secs)
    );

    let ratio = if view.duration_secs > 0.0 {
        (view.position_secs / view.duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme::ACCENT).bg(theme::GAUGE_BG))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

/// Handle click on the scrub bar: seek proportionally.
pub fn handle_scrub_click(app: &mut App, scrub_area: Rect, x: u16) {
    if scrub_area.width == 0 || x < scrub_area.x || x >= scrub_area.x + scrub_area.width {
        return;
    }
    let ratio = (x - scrub_area.x) as f64 / scrub_area.width as f64;
    app.seek_to_fraction(ratio);
}

fn status_color(status: &SyncStatus) -> Color {
    match status {
        SyncStatus::Ready => theme::DIM,
        SyncStatus::Connecting | SyncStatus::NoSong => Color::Yellow,
        SyncStatus::Connected => Color::Green,
        SyncStatus::Error(_) => Color::Red,
    }
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.view;
    let status_text = match &view.status {
        SyncStatus::Error(e) => format!("{}: {}", e.display_name(), e.display_message()),
        status => status.to_string(),
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled("\u{25CF} ", Style::default().fg(status_color(&view.status))),
        Span::styled(status_text, Style::default().fg(theme::TEXT)),
    ];

    let separator = || Span::styled("  |  ", Style::default().fg(theme::DIM));
    if let Some(last_sync) = view.last_sync {
        spans.push(separator());
        spans.push(Span::styled(
            format!("synced {}", last_sync.format("%H:%M:%S")),
            Style::default().fg(theme::DIM),
        ));
    }
    if !view.timeline.is_empty() {
        spans.push(separator());
        spans.push(Span::styled(
            format!("{} lines", view.timeline.len()),
            Style::default().fg(theme::DIM),
        ));
    }
    if let Some(notice) = &app.notice {
        spans.push(separator());
        spans.push(Span::styled(
            notice.as_str(),
            Style::default().fg(theme::SELECTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_actions: &[keys::Action] = match app.focused_panel {
        FocusedPanel::Lyrics => keys::LYRICS_HELP,
        FocusedPanel::Logs => keys::LOGS_HELP,
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for action in help_actions {
        if let Some((key, label)) = action.help_label(&app.view) {
            spans.push(Span::styled(
                String::from(key),
                Style::default().fg(theme::ACCENT),
            ));
            spans.push(Span::styled(
                format!(":{label} "),
                Style::default().fg(theme::TEXT),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Cut `text` to at most `max_width` display columns, ending with an
/// ellipsis if anything was removed. Wide (CJK) characters count as two.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width - 1 {
            break;
        }
        width += char_width;
        result.push(c);
    }
    result.push('\u{2026}');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_display_columns() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("exactly", 7), "exactly");
        assert_eq!(truncate_to_width("truncated", 6), "trunc\u{2026}");
        // Each of these takes two columns.
        assert_eq!(truncate_to_width("晴天晴天", 5), "晴天\u{2026}");
        assert_eq!(truncate_to_width("anything", 0), "");
    }
}
