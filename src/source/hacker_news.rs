//! Hacker News Firebase API source.
//!
//! Two unauthenticated GETs:
//!
//! * `{base}/topstories.json` → JSON array of integer IDs
//! * `{base}/item/{id}.json`  → JSON object with `title` and `url`
//!
//! The response body is read in full and decoded separately so transport
//! failures surface as [`FeedError::Network`] and bad payloads as
//! [`FeedError::Decode`].

use reqwest::blocking::Client;
use tracing::{debug, warn};

use super::{Story, StorySource};
use crate::config::Config;
use crate::error::{FeedError, Result};

pub struct HackerNewsSource {
    client: Client,
    base_url: String,
}

impl HackerNewsSource {
    /// Never fails: if the tuned client cannot be built, a default client
    /// is used instead and the problem is logged.
    pub fn new(config: &Config) -> Self {
        let client = Self::build_client(config).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        });
        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_client(config: &Config) -> Result<Client> {
        let client = Client::builder()
            .user_agent(concat!("hn-intel-feed/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout)
            .build()?;
        Ok(client)
    }

    fn top_stories_url(&self) -> String {
        format!("{}/topstories.json", self.base_url)
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/item/{id}.json", self.base_url)
    }

    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "GET");
        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .bytes()?;
        Ok(body.to_vec())
    }

    /// Decode the top-stories payload.  Pure, so it is testable offline.
    pub fn parse_story_ids(body: &[u8]) -> Result<Vec<u64>> {
        serde_json::from_slice(body).map_err(FeedError::from)
    }

    /// Decode an item payload.  A deleted item comes back as `null`,
    /// which is a decode error here.
    pub fn parse_story(body: &[u8]) -> Result<Story> {
        serde_json::from_slice(body).map_err(FeedError::from)
    }
}

impl StorySource for HackerNewsSource {
    fn list_top_story_ids(&self) -> Result<Vec<u64>> {
        let body = self.get_bytes(&self.top_stories_url())?;
        Self::parse_story_ids(&body)
    }

    fn fetch_story(&self, id: u64) -> Result<Story> {
        let body = self.get_bytes(&self.item_url(id))?;
        Self::parse_story(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with_base(base: &str) -> HackerNewsSource {
        let config = Config {
            api_base_url: base.into(),
            ..Config::default()
        };
        HackerNewsSource::new(&config)
    }

    #[test]
    fn tuned_client_builds_with_default_config() {
        assert!(HackerNewsSource::build_client(&Config::default()).is_ok());
    }

    #[test]
    fn construction_is_infallible_and_trims_base() {
        let src = HackerNewsSource::new(&Config {
            api_base_url: "http://localhost:1234///".into(),
            ..Config::default()
        });
        assert_eq!(src.top_stories_url(), "http://localhost:1234/topstories.json");
    }

    #[test]
    fn builds_endpoint_urls() {
        let src = source_with_base("https://hacker-news.firebaseio.com/v0/");
        assert_eq!(
            src.top_stories_url(),
            "https://hacker-news.firebaseio.com/v0/topstories.json"
        );
        assert_eq!(
            src.item_url(8863),
            "https://hacker-news.firebaseio.com/v0/item/8863.json"
        );
    }

    #[test]
    fn parses_ordered_id_list() {
        let ids = HackerNewsSource::parse_story_ids(b"[9129911, 9129199, 9127761]").unwrap();
        assert_eq!(ids, vec![9129911, 9129199, 9127761]);
    }

    #[test]
    fn malformed_id_list_is_a_decode_error() {
        let err = HackerNewsSource::parse_story_ids(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn parses_story_item() {
        let body = br#"{"id":8863,"title":"My YC app: Dropbox","url":"http://www.getdropbox.com/u/2/screencast.html","score":111}"#;
        let story = HackerNewsSource::parse_story(body).unwrap();
        assert_eq!(story.title, "My YC app: Dropbox");
        assert_eq!(story.url, "http://www.getdropbox.com/u/2/screencast.html");
    }

    #[test]
    fn deleted_item_is_a_decode_error() {
        let err = HackerNewsSource::parse_story(b"null").unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        let src = source_with_base("http://127.0.0.1:9");
        let err = src.list_top_story_ids().unwrap_err();
        assert!(matches!(err, FeedError::Network(_)));
    }
}
