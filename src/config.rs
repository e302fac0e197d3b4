//! Fixed runtime settings.
//!
//! There is no config file, environment surface or command line: every
//! value here is a constant.  They are gathered into [`Config`] so the
//! wiring in `main.rs` reads in one place and tests can swap pieces out.

use std::time::Duration;

/// Base URL of the Hacker News Firebase API.
pub const API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Maximum number of entries kept in the feed.
pub const MAX_ENTRIES: usize = 20;

/// How many new stories one poll cycle adds.
pub const STORIES_PER_CYCLE: usize = 1;

/// Delay between the end of one cycle and the start of the next.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// External model runner invoked as `<program> run <model> <prompt>`.
pub const CLASSIFIER_PROGRAM: &str = "ollama";

/// Model name passed to the runner.
pub const CLASSIFIER_MODEL: &str = "llama3.2";

/// Upper bound on a single classifier run before the child is killed.
pub const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(120);

/// Per-request timeout for the story API.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Log output goes here; stdout belongs to the terminal UI.
pub const LOG_FILE: &str = "hn-intel-feed.log";

/// Title of the feed pane.
pub const FEED_TITLE: &str = "High-Value Intelligence Feed";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub max_entries: usize,
    pub stories_per_cycle: usize,
    pub poll_interval: Duration,
    /// Whether stories go through the classifier at all.
    pub classify: bool,
    pub classifier_program: String,
    pub classifier_model: String,
    pub classifier_timeout: Duration,
    pub http_timeout: Duration,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.into(),
            max_entries: MAX_ENTRIES,
            stories_per_cycle: STORIES_PER_CYCLE,
            poll_interval: POLL_INTERVAL,
            classify: true,
            classifier_program: CLASSIFIER_PROGRAM.into(),
            classifier_model: CLASSIFIER_MODEL.into(),
            classifier_timeout: CLASSIFIER_TIMEOUT,
            http_timeout: HTTP_TIMEOUT,
            log_file: LOG_FILE.into(),
        }
    }
}
