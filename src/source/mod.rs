//! Story source abstraction.
//!
//! [`StorySource`] is the two-call interface the poller needs: list the
//! current top story IDs, then fetch one story by ID.  The live
//! implementation talks to the Hacker News API ([`HackerNewsSource`]);
//! tests plug in an in-memory fake.

mod hacker_news;
mod story;

pub use hacker_news::HackerNewsSource;
pub use story::Story;

use crate::error::Result;

/// Anything that can hand the poller ranked story IDs and story details.
///
/// The poller runs on a background thread, so implementations must be
/// [`Send`].  Neither call retries; the poller decides what a failure
/// means.
pub trait StorySource: Send {
    /// Ordered list of story IDs, best-ranked first.
    fn list_top_story_ids(&self) -> Result<Vec<u64>>;

    /// Title and URL for one story.
    fn fetch_story(&self, id: u64) -> Result<Story>;
}
