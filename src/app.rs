use chrono::{DateTime, Local};
use ratatui::{
    text::Text,
    widgets::{Paragraph, Wrap},
};

use crate::markup;
use crate::poll::{PollMsg, PollState};

/// UI-side state.
///
/// The feed itself lives in the poller thread; the app only keeps the
/// latest rendered snapshot it was sent.
pub struct App {
    /// Styled feed text, ready to draw.
    pub feed: Text<'static>,
    /// Number of entries in the latest snapshot.
    pub entries: usize,
    /// First visible screen row of the feed pane.
    pub scroll: u16,
    /// Inner width and height of the feed pane as last drawn.
    viewport: Option<(u16, u16)>,
    pub poll_state: PollState,
    /// When the last snapshot arrived.
    pub last_update: Option<DateTime<Local>>,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            feed: Text::default(),
            entries: 0,
            scroll: 0,
            viewport: None,
            poll_state: PollState::Idle,
            last_update: None,
            quit: false,
        }
    }

    pub fn apply(&mut self, msg: PollMsg) {
        match msg {
            PollMsg::State(state) => self.poll_state = state,
            PollMsg::Feed { text, entries } => {
                self.feed = markup::to_text(&text);
                self.entries = entries;
                self.last_update = Some(Local::now());
                self.scroll = self.scroll.min(self.max_scroll());
            }
        }
    }

    // -- scrolling -----------------------------------------------------------

    /// Record the pane's inner size; scroll limits follow the wrapped
    /// height of the feed at this width.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = Some((width, height));
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Screen rows the feed occupies, after wrapping when the width is known.
    fn content_rows(&self) -> usize {
        match self.viewport {
            Some((width, _)) if width > 0 => Paragraph::new(self.feed.clone())
                .wrap(Wrap { trim: false })
                .line_count(width),
            _ => self.feed.lines.len(),
        }
    }

    /// Largest scroll that still fills the pane; the last row sits at the
    /// bottom edge.  Before the first draw this is one row per line.
    fn max_scroll(&self) -> u16 {
        let height = self.viewport.map_or(1, |(_, h)| usize::from(h.max(1)));
        let rows = self.content_rows().saturating_sub(height);
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_add(by).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// One-line summary shown along the bottom border.
    pub fn status_line(&self) -> String {
        let state = match self.poll_state {
            PollState::Idle => "idle",
            PollState::Fetching => "fetching…",
        };
        let updated = self
            .last_update
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".into());
        format!(" {state} · {} entries · updated {updated} ", self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_msg(text: &str, entries: usize) -> PollMsg {
        PollMsg::Feed {
            text: text.to_string(),
            entries,
        }
    }

    #[test]
    fn new_app_starts_empty() {
        let app = App::new();
        assert_eq!(app.entries, 0);
        assert_eq!(app.scroll, 0);
        assert!(!app.quit);
        assert!(app.last_update.is_none());
    }

    #[test]
    fn feed_message_replaces_snapshot() {
        let mut app = App::new();
        app.apply(feed_msg("[white]a[-]\n\n[gray]b[-]", 2));

        assert_eq!(app.entries, 2);
        assert_eq!(app.feed.lines.len(), 3);
        assert!(app.last_update.is_some());
    }

    #[test]
    fn state_message_updates_poll_state() {
        let mut app = App::new();
        app.apply(PollMsg::State(PollState::Fetching));
        assert_eq!(app.poll_state, PollState::Fetching);
        assert!(app.status_line().contains("fetching"));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut app = App::new();
        app.apply(feed_msg("1\n2\n3\n4", 1));

        app.scroll_down(10);
        assert_eq!(app.scroll, 3);

        app.scroll_up(1);
        assert_eq!(app.scroll, 2);

        app.scroll_up(10);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn scroll_on_empty_feed_is_noop() {
        let mut app = App::new();
        app.scroll_down(3);
        assert_eq!(app.scroll, 0);
        app.scroll_to_bottom();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn shorter_snapshot_pulls_scroll_back() {
        let mut app = App::new();
        app.apply(feed_msg("1\n2\n3\n4\n5", 1));
        app.scroll_to_bottom();
        assert_eq!(app.scroll, 4);

        app.apply(feed_msg("1\n2", 1));
        assert_eq!(app.scroll, 1);
    }

    #[test]
    fn wrapped_lines_extend_scroll_range() {
        let mut app = App::new();
        app.apply(feed_msg(&format!("{}\nend", "a".repeat(25)), 1));
        app.set_viewport(10, 1);

        app.scroll_to_bottom();
        // 25 chars at width 10 wrap to 3 rows, plus the "end" row.
        assert!(app.scroll >= 3, "scroll = {}", app.scroll);
    }

    #[test]
    fn taller_viewport_shrinks_scroll_range() {
        let mut app = App::new();
        app.apply(feed_msg("1\n2\n3\n4\n5", 1));
        app.scroll_to_bottom();
        assert_eq!(app.scroll, 4);

        app.set_viewport(80, 3);
        assert_eq!(app.scroll, 2);
    }

    #[test]
    fn jump_to_top_and_bottom() {
        let mut app = App::new();
        app.apply(feed_msg("1\n2\n3", 1));
        app.scroll_to_bottom();
        assert_eq!(app.scroll, 2);
        app.scroll_to_top();
        assert_eq!(app.scroll, 0);
    }
}
