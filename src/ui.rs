//! Terminal UI rendering.
//!
//! One full-screen pane: a bordered, titled paragraph showing the feed,
//! scrolled by [`App::scroll`], with the poll status on the bottom border.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::config::FEED_TITLE;

/// Draw the complete UI for one frame.
///
/// Takes `&mut App` so the pane's inner size can be fed back into the
/// scroll limits before rendering.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let block = Block::bordered()
        .title(format!(" {FEED_TITLE} "))
        .title_bottom(Line::from(Span::styled(
            app.status_line(),
            Style::default().fg(Color::Yellow),
        )));

    let inner = block.inner(area);
    app.set_viewport(inner.width, inner.height);

    let body = if app.entries == 0 {
        Text::styled("Waiting for the first stories…", Style::default().fg(Color::DarkGray))
    } else {
        app.feed.clone()
    };

    let feed = Paragraph::new(body)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));

    frame.render_widget(feed, area);
}
