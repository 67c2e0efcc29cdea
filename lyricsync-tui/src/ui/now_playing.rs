use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::SessionView;

use super::{theme, truncate_to_width};

pub fn draw(frame: &mut Frame, view: &SessionView, area: Rect) {
    let Some(identity) = &view.identity else {
        let idle = Paragraph::new(vec![
            Line::from(Span::styled(
                " Nothing playing",
                Style::default().fg(theme::DIM),
            )),
            Line::from(Span::styled(
                " Play a song in NetEase Cloud Music, then start syncing",
                Style::default().fg(theme::DIM),
            )),
        ]);
        frame.render_widget(idle, area);
        return;
    };

    let width = area.width.saturating_sub(1) as usize;

    // Line 1: title by artists
    let title = truncate_to_width(&identity.display_name, width);
    let artists = truncate_to_width(
        &format!(" by {}", identity.artists),
        width.saturating_sub(unicode_width::UnicodeWidthStr::width(title.as_str())),
    );
    let line1 = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(artists, Style::default().fg(theme::ACCENT)),
    ]);

    // Line 2: album, and the cover link when there is one
    let mut album = identity.album.clone();
    if let Some(cover_url) = &identity.cover_url {
        album.push_str("  ");
        album.push_str(cover_url);
    }
    let line2 = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            truncate_to_width(&album, width),
            Style::default().fg(theme::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(vec![line1, line2]), area);
}
