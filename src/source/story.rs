//! The story type returned by every source.

use serde::Deserialize;

/// A headline and the link it points to.
///
/// Only the two fields the feed shows are decoded; anything else in the
/// API payload is ignored.  Items without a `url` (Ask HN, polls) decode
/// with an empty string, as do items without a `title`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

impl Story {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_title_and_url_ignoring_other_fields() {
        let json = r#"{"by":"pg","id":1,"score":57,"title":"Y Combinator","type":"story","url":"http://ycombinator.com"}"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story, Story::new("Y Combinator", "http://ycombinator.com"));
    }

    #[test]
    fn missing_url_defaults_to_empty() {
        let json = r#"{"id":121003,"title":"Ask HN: The Arc Effect","type":"story"}"#;
        let story: Story = serde_json::from_str(json).unwrap();
        assert_eq!(story.title, "Ask HN: The Arc Effect");
        assert!(story.url.is_empty());
    }
}
