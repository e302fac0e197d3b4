//! Background story polling.
//!
//! A [`Poller`] owns the [`FeedBuffer`] and the set of story IDs already
//! shown; nothing else touches them.  It runs on a dedicated thread,
//! performing one fetch → classify → insert cycle at a time, and hands the
//! UI thread a rendered snapshot over an [`mpsc`] channel after each one.
//!
//! The loop sleeps a fixed delay *after* each cycle rather than ticking at
//! a fixed rate, so a slow classifier stretches the effective period.

use std::collections::HashSet;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::classifier::{Classify, Insight};
use crate::feed::{FeedBuffer, FeedEntry};
use crate::source::{Story, StorySource};

/// What the poller is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Sleeping until the next cycle.
    Idle,
    /// A cycle is in progress.
    Fetching,
}

/// Messages sent from the poller thread to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollMsg {
    /// The poller changed state.
    State(PollState),
    /// A cycle finished; this is the freshly rendered feed.
    Feed { text: String, entries: usize },
}

/// Outcome of one cycle, mostly useful for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleReport {
    /// Entries added to the feed (stories and error lines).
    pub inserted: usize,
    /// Story IDs whose fetch failed and were skipped.
    pub skipped: usize,
}

pub struct Poller {
    source: Box<dyn StorySource>,
    classifier: Option<Box<dyn Classify>>,
    buffer: FeedBuffer,
    /// IDs already shown.  Grows for the life of the process.
    seen: HashSet<u64>,
    stories_per_cycle: usize,
}

impl Poller {
    pub fn new(
        source: Box<dyn StorySource>,
        classifier: Option<Box<dyn Classify>>,
        max_entries: usize,
        stories_per_cycle: usize,
    ) -> Self {
        Self {
            source,
            classifier,
            buffer: FeedBuffer::new(max_entries),
            seen: HashSet::new(),
            stories_per_cycle,
        }
    }

    pub fn buffer(&self) -> &FeedBuffer {
        &self.buffer
    }

    /// Run one fetch → classify → insert cycle.
    ///
    /// Never fails: a failed ID list becomes a red error entry, a failed
    /// story fetch is skipped, and a failed classification becomes a
    /// placeholder insight.
    pub fn run_cycle(&mut self) -> CycleReport {
        let mut report = CycleReport::default();

        let (stories, skipped) = match self.fetch_new_stories() {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "failed to list top stories");
                self.buffer.insert_front(FeedEntry::error(&e));
                report.inserted += 1;
                return report;
            }
        };
        report.skipped = skipped;

        for story in stories {
            let insight = self.classify(&story);
            info!(priority = %insight.priority, title = %insight.title, "adding story");
            self.buffer.insert_front(FeedEntry::from_insight(&insight));
            report.inserted += 1;
        }

        report
    }

    /// Walk the ranked IDs, fetching unseen stories until enough were found.
    ///
    /// An ID is marked seen only once its fetch succeeds, so failures are
    /// retried on a later cycle.
    fn fetch_new_stories(&mut self) -> crate::error::Result<(Vec<Story>, usize)> {
        let ids = self.source.list_top_story_ids()?;
        let mut stories = Vec::new();
        let mut skipped = 0;

        for id in ids {
            if stories.len() >= self.stories_per_cycle {
                break;
            }
            if self.seen.contains(&id) {
                continue;
            }
            match self.source.fetch_story(id) {
                Ok(story) => {
                    self.seen.insert(id);
                    stories.push(story);
                }
                Err(e) => {
                    warn!(id, error = %e, "skipping story");
                    skipped += 1;
                }
            }
        }

        Ok((stories, skipped))
    }

    fn classify(&self, story: &Story) -> Insight {
        let Some(classifier) = &self.classifier else {
            return Insight::unrated(story);
        };
        classifier.classify(story).unwrap_or_else(|e| {
            warn!(title = %story.title, error = %e, "classification failed");
            Insight::unavailable(story)
        })
    }
}

/// Spawn the background polling thread.
///
/// Returns a receiver that the main loop should drain on every tick.
/// The thread stops once the receiver is dropped.
pub fn spawn(mut poller: Poller, interval: Duration) -> mpsc::Receiver<PollMsg> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || loop {
        if tx.send(PollMsg::State(PollState::Fetching)).is_err() {
            return;
        }

        let report = poller.run_cycle();
        info!(inserted = report.inserted, skipped = report.skipped, "poll cycle done");

        let feed = PollMsg::Feed {
            text: poller.buffer().render(),
            entries: poller.buffer().len(),
        };
        if tx.send(feed).is_err() || tx.send(PollMsg::State(PollState::Idle)).is_err() {
            return;
        }

        thread::sleep(interval);
    });

    rx
}
