//! MediaWiki action API client.
//!
//! Fetches plain-text extracts with section markers plus canonical page
//! info in a single request, then hands the extract to
//! [`split_sections`](crate::split_sections).

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{FetchError, FetchedArticle, Fetcher, render, wikitext};

/// Default Wikipedia language edition.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default user agent; the API asks clients to identify themselves.
pub const DEFAULT_USER_AGENT: &str = concat!("alex/", env!("CARGO_PKG_VERSION"));

/// A blocking Wikipedia client implementing [`Fetcher`].
#[derive(Debug)]
pub struct WikipediaFetcher {
    /// Shared blocking HTTP client.
    client: reqwest::blocking::Client,
    /// Language edition, e.g. "en" or "de".
    language: String,
}

/// Top-level API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    /// The query result; absent on API-level errors.
    query: Option<ApiQuery>,
}

/// The `query` object of an API response.
#[derive(Debug, Deserialize)]
struct ApiQuery {
    /// Requested pages; with `formatversion=2` this is an array.
    #[serde(default)]
    pages: Vec<ApiPage>,
}

/// One page entry of an API response.
#[derive(Debug, Deserialize)]
struct ApiPage {
    /// Canonical page title.
    title: String,
    /// Set when the page does not exist.
    #[serde(default)]
    missing: bool,
    /// Plain-text extract with `== Section ==` markers.
    #[serde(default)]
    extract: Option<String>,
    /// Canonical page URL.
    #[serde(default)]
    fullurl: Option<String>,
}

impl WikipediaFetcher {
    /// Creates a fetcher for the given language edition.
    pub fn new(language: &str, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            language: language.to_string(),
        })
    }

    /// Creates a fetcher with the default language and user agent.
    pub fn default_client() -> Result<Self, FetchError> {
        Self::new(DEFAULT_LANGUAGE, DEFAULT_USER_AGENT)
    }

    /// Retrieves the article for `topic`.
    ///
    /// `Ok(None)` means the page does not exist; errors are transport or
    /// protocol failures.
    pub fn article(&self, topic: &str) -> Result<Option<FetchedArticle>, FetchError> {
        let endpoint = format!("https://{}.wikipedia.org/w/api.php", self.language);
        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|info"),
                ("inprop", "url"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", topic),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: ApiResponse = response.json()?;
        let page = body
            .query
            .ok_or_else(|| FetchError::Decode("response has no query object".into()))?
            .pages
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::Decode("response has no pages".into()))?;

        if page.missing {
            debug!(topic, "page does not exist");
            return Ok(None);
        }

        let extract = page
            .extract
            .ok_or_else(|| FetchError::Decode("page has no extract".into()))?;
        let url = page.fullurl.unwrap_or_else(|| {
            format!(
                "https://{}.wikipedia.org/wiki/{}",
                self.language,
                page.title.replace(' ', "_")
            )
        });

        let (summary, sections) = wikitext::split_sections(&extract);
        debug!(topic, title = %page.title, sections = sections.len(), "fetched article");

        Ok(Some(FetchedArticle {
            title: page.title,
            url,
            summary,
            sections,
        }))
    }
}

impl Fetcher for WikipediaFetcher {
    fn fetch(&self, topic: &str) -> Option<String> {
        match self.article(topic) {
            Ok(Some(article)) => Some(render::render_markdown(topic, &article, Utc::now())),
            Ok(None) => None,
            Err(err) => {
                warn!(topic, error = %err, "article fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_json_decodes() {
        let raw = r#"{
            "query": {
                "pages": [
                    {
                        "pageid": 20423,
                        "title": "Malaria",
                        "extract": "Lead.\n\n== History ==\nText.",
                        "fullurl": "https://en.wikipedia.org/wiki/Malaria"
                    }
                ]
            }
        }"#;

        let parsed: ApiResponse = serde_json::from_str(raw).unwrap();
        let page = &parsed.query.unwrap().pages[0];
        assert_eq!(page.title, "Malaria");
        assert!(!page.missing);
        assert!(page.extract.as_deref().unwrap().contains("== History =="));
    }

    #[test]
    fn test_missing_page_json_decodes() {
        let raw = r#"{
            "query": {
                "pages": [
                    { "title": "No Such Page", "missing": true }
                ]
            }
        }"#;

        let parsed: ApiResponse = serde_json::from_str(raw).unwrap();
        let page = &parsed.query.unwrap().pages[0];
        assert!(page.missing);
        assert!(page.extract.is_none());
    }

    #[test]
    fn test_default_user_agent_names_the_tool() {
        assert!(DEFAULT_USER_AGENT.starts_with("alex/"));
    }
}
