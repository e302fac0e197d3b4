//! Relevance classification through an external text model.
//!
//! The classifier runs `<program> run <model> <prompt>` as a child
//! process, waits for it to exit, and reads the first line of its stdout
//! as a priority label and the rest as a summary.  The run is bounded by
//! a timeout; a child that outlives it is killed.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{FeedError, Result};
use crate::source::Story;

/// Summary used when the model answers with fewer than two lines.
pub const INVALID_RESPONSE_SUMMARY: &str = "[red]Invalid response format from model[-]";

/// Priority assigned to a malformed model answer.
pub const INVALID_RESPONSE_PRIORITY: &str = "Low";

/// Summary used when the classifier fails outright.
pub const UNAVAILABLE_SUMMARY: &str = "[red]Analysis not available[-]";

/// Priority assigned when the classifier fails outright.
pub const UNAVAILABLE_PRIORITY: &str = "Unknown";

/// Priority shown when classification is switched off.
pub const UNRATED_PRIORITY: &str = "Unrated";

/// A story together with the model's verdict on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub priority: String,
}

impl Insight {
    /// Placeholder for a story whose classification failed.
    pub fn unavailable(story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            url: story.url.clone(),
            summary: UNAVAILABLE_SUMMARY.into(),
            priority: UNAVAILABLE_PRIORITY.into(),
        }
    }

    /// A story shown without running the classifier.
    pub fn unrated(story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            url: story.url.clone(),
            summary: String::new(),
            priority: UNRATED_PRIORITY.into(),
        }
    }
}

/// Rates a story's relevance.
pub trait Classify: Send {
    fn classify(&self, story: &Story) -> Result<Insight>;
}

/// Runs a local model runner (Ollama by default) as a subprocess.
pub struct CommandClassifier {
    program: String,
    model: String,
    timeout: Duration,
}

impl CommandClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            program: config.classifier_program.clone(),
            model: config.classifier_model.clone(),
            timeout: config.classifier_timeout,
        }
    }
}

impl Classify for CommandClassifier {
    fn classify(&self, story: &Story) -> Result<Insight> {
        let prompt = build_prompt(story);
        debug!(program = %self.program, model = %self.model, title = %story.title, "running classifier");

        let mut command = Command::new(&self.program);
        command.arg("run").arg(&self.model).arg(&prompt);

        let output = run_with_timeout(command, self.timeout)?;
        Ok(parse_output(story, &output))
    }
}

/// The fixed analyst prompt with the story's title and URL filled in.
pub fn build_prompt(story: &Story) -> String {
    format!(
        "You are an expert cybersecurity analyst. Analyze the following headline and URL \
         to determine its relevance and priority in cybersecurity. Respond with a priority \
         level (e.g., High, Medium, Low) and provide a summary if relevant. Keep everything \
         very short.\n\nTitle: {}\nURL: {}",
        story.title, story.url
    )
}

/// Turn raw model output into an [`Insight`].
///
/// Lines are split on `'\n'` exactly, so a trailing newline yields a
/// trailing empty line.  The first line is the priority, taken verbatim;
/// the remaining lines are joined with single spaces.
pub fn parse_output(story: &Story, output: &str) -> Insight {
    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() < 2 {
        return Insight {
            title: story.title.clone(),
            url: story.url.clone(),
            summary: INVALID_RESPONSE_SUMMARY.into(),
            priority: INVALID_RESPONSE_PRIORITY.into(),
        };
    }

    Insight {
        title: story.title.clone(),
        url: story.url.clone(),
        summary: lines[1..].join(" "),
        priority: lines[0].to_string(),
    }
}

/// Run `command` to completion and return its stdout, killing it once
/// `timeout` has elapsed.
///
/// The child is driven on a single-threaded tokio runtime local to this
/// call, so callers stay synchronous.  `kill_on_drop` reaps the child when
/// the timed-out wait is dropped.
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<String> {
    let program = command.as_std().get_program().to_string_lossy().into_owned();
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| FeedError::Classifier(format!("failed to start runtime: {e}")))?;

    let output = runtime.block_on(async {
        let child = command
            .spawn()
            .map_err(|e| FeedError::Classifier(format!("failed to spawn {program}: {e}")))?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => {
                output.map_err(|e| FeedError::Classifier(format!("wait failed: {e}")))
            }
            Err(_) => {
                warn!(program = %program, ?timeout, "classifier timed out, killing");
                Err(FeedError::Classifier(format!(
                    "timed out after {}s",
                    timeout.as_secs_f32()
                )))
            }
        }
    })?;

    if !output.status.success() {
        return Err(FeedError::Classifier(format!("exited with {}", output.status)));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
