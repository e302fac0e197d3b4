//! The bounded, newest-first feed and its fade rendering.
//!
//! Entries are pre-formatted text blocks using inline color tags
//! (`[yellow]…[-]`, see [`crate::markup`]).  [`FeedBuffer::render`] wraps
//! every entry in a fade color picked from its position so older entries
//! look dimmer, then joins them with blank lines.
//!
//! The fade bucket for the entry at position `i` of `n` is
//! `i * (FADE_LEVELS.len() - 1) / n`.  It divides by the current length,
//! not the capacity, so the gradient stretches as the buffer fills.

use std::collections::VecDeque;

use crate::classifier::Insight;

/// Fade colors from newest (brightest) to oldest.
pub const FADE_LEVELS: [&str; 5] = ["[white]", "[lightgray]", "[gray]", "[darkgray]", "[black]"];

/// Closes a color tag.
pub const RESET: &str = "[-]";

const ENTRY_SEPARATOR: &str = "\n\n";

/// One formatted block of feed text.  Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry(String);

impl FeedEntry {
    #[cfg(test)]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Priority, title, URL and summary on four lines.
    pub fn from_insight(insight: &Insight) -> Self {
        Self(format!(
            "[yellow]Priority: {}[-]\n[green]{}[-]\n{}\n{}",
            insight.priority, insight.title, insight.url, insight.summary
        ))
    }

    /// A red error line shown in place of a batch that failed to load.
    pub fn error(err: &dyn std::fmt::Display) -> Self {
        Self(format!("[red]Error: {err}[-]"))
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Newest-first list of entries holding at most `max_entries`.
#[derive(Debug, Clone)]
pub struct FeedBuffer {
    entries: VecDeque<FeedEntry>,
    max_entries: usize,
}

impl FeedBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries + 1),
            max_entries,
        }
    }

    /// Put `entry` at the front, dropping the oldest entries past capacity.
    pub fn insert_front(&mut self, entry: FeedEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    /// Fade bucket for position `index` in a buffer of `len` entries.
    ///
    /// `len == 0` has no positions; it maps to the first level.
    pub fn fade_bucket(index: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        index * (FADE_LEVELS.len() - 1) / len
    }

    /// The whole feed as tagged text, newest entry first.
    ///
    /// An empty buffer renders as an empty string.
    pub fn render(&self) -> String {
        let n = self.entries.len();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let color = FADE_LEVELS[Self::fade_bucket(i, n)];
                format!("{color}{}{RESET}", entry.text())
            })
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR)
    }
}
