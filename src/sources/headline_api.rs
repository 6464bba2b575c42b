//! Headline-API source adapter (NewsAPI-shaped).
//!
//! Issues a single paged `top-headlines` query for the configured source
//! identifier. Unlike the other adapters, the API delivers article text in
//! the response, so these candidates carry `text` and skip the extractor:
//! the `content` field is preferred, falling back to `description`, falling
//! back to the empty string (which the normalizer then drops).
//!
//! API: `https://newsapi.org/v2/top-headlines`
//! Auth: key via `apiKey` query param, supplied by the environment and
//! validated before any network activity.

use crate::error::SourceError;
use crate::models::Candidate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

const TOP_HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

#[derive(Debug, Deserialize)]
struct HeadlineResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<HeadlineItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeadlineItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

pub async fn fetch(
    client: &Client,
    outlet: &str,
    source_id: &str,
    limit: usize,
    api_key: &str,
) -> Result<Vec<Candidate>, SourceError> {
    let url = format!(
        "{}?sources={}&pageSize={}&apiKey={}",
        TOP_HEADLINES_URL,
        urlencoding::encode(source_id),
        limit,
        api_key
    );

    // The key is part of the query string, so errors report the endpoint
    // rather than the full request URL.
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SourceError::Request {
            url: TOP_HEADLINES_URL.to_string(),
            source: e,
        })?;
    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: TOP_HEADLINES_URL.to_string(),
            status: response.status().as_u16(),
        });
    }

    let data: HeadlineResponse =
        response
            .json()
            .await
            .map_err(|e| SourceError::Api {
                source_id: source_id.to_string(),
                message: format!("unparsable response: {e}"),
            })?;
    if data.status != "ok" {
        return Err(SourceError::Api {
            source_id: source_id.to_string(),
            message: data
                .message
                .unwrap_or_else(|| format!("status {}", data.status)),
        });
    }

    let candidates = map_items(outlet, data.articles, limit);
    info!(outlet, source_id, count = candidates.len(), "Indexed headline-api candidates");
    Ok(candidates)
}

/// Map API items to candidates with the content -> description -> "" text
/// fallback. Items without a URL are skipped and logged.
pub(crate) fn map_items(outlet: &str, items: Vec<HeadlineItem>, limit: usize) -> Vec<Candidate> {
    items
        .into_iter()
        .filter_map(|item| {
            let Some(link) = item.url else {
                warn!(outlet, title = ?item.title, "Skipping headline without url");
                return None;
            };
            let text = item.content.or(item.description).unwrap_or_default();
            Some(Candidate {
                outlet: outlet.to_string(),
                link,
                title: item.title,
                published_at: item.published_at,
                text: Some(text),
            })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(url: Option<&str>, content: Option<&str>, description: Option<&str>) -> HeadlineItem {
        HeadlineItem {
            title: Some("Headline".to_string()),
            description: description.map(str::to_string),
            content: content.map(str::to_string),
            url: url.map(str::to_string),
            published_at: Some("2026-08-25T09:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_content_preferred_over_description() {
        let candidates = map_items(
            "ABC News",
            vec![item(Some("https://abc.example/a"), Some("full content"), Some("summary"))],
            10,
        );
        assert_eq!(candidates[0].text.as_deref(), Some("full content"));
    }

    #[test]
    fn test_description_fallback_then_empty() {
        let candidates = map_items(
            "ABC News",
            vec![
                item(Some("https://abc.example/a"), None, Some("summary")),
                item(Some("https://abc.example/b"), None, None),
            ],
            10,
        );
        assert_eq!(candidates[0].text.as_deref(), Some("summary"));
        assert_eq!(candidates[1].text.as_deref(), Some(""));
    }

    #[test]
    fn test_items_without_url_skipped() {
        let candidates = map_items(
            "ABC News",
            vec![
                item(None, Some("content"), None),
                item(Some("https://abc.example/a"), Some("content"), None),
            ],
            10,
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].link, "https://abc.example/a");
    }

    #[test]
    fn test_limit_bounds_items() {
        let items: Vec<HeadlineItem> = (0..5)
            .map(|i| {
                item(
                    Some(&format!("https://abc.example/{i}")),
                    Some("content"),
                    None,
                )
            })
            .collect();
        assert_eq!(map_items("ABC News", items, 3).len(), 3);
    }

    #[test]
    fn test_error_response_shape_parses() {
        let json = r#"{"status":"error","code":"apiKeyMissing","message":"Your API key is missing."}"#;
        let resp: HeadlineResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.status, "error");
        assert_eq!(resp.message.as_deref(), Some("Your API key is missing."));
        assert!(resp.articles.is_empty());
    }
}
