//! Page-scrape source adapter.
//!
//! Fetches an outlet's listing page (e.g. a politics section front) and
//! extracts hyperlinks whose resolved path contains the configured section
//! segment. Relative hrefs are resolved against the listing URL, so
//! multi-level listing paths and protocol-relative hrefs both land on the
//! right origin. Links are deduplicated by absolute URL in first-seen order
//! and truncated to the candidate limit.

use crate::error::SourceError;
use crate::models::Candidate;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;

pub async fn fetch(
    client: &Client,
    outlet: &str,
    url: &str,
    section: &str,
    limit: usize,
) -> Result<Vec<Candidate>, SourceError> {
    let base = Url::parse(url).map_err(|e| SourceError::InvalidUrl {
        url: url.to_string(),
        source: e,
    })?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Request {
            url: url.to_string(),
            source: e,
        })?;
    if !response.status().is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let html = response.text().await.map_err(|e| SourceError::Request {
        url: url.to_string(),
        source: e,
    })?;

    let candidates = collect_links(outlet, &html, &base, section, limit);
    info!(
        outlet,
        count = candidates.len(),
        listing = url,
        "Indexed listing candidates"
    );
    debug!(links = ?candidates.iter().map(|c| c.link.as_str()).collect::<Vec<_>>(), "Listing links");
    Ok(candidates)
}

/// Extract section-matching links from listing markup.
///
/// Pure over the fetched HTML so the filter, resolution, dedup, and limit
/// behavior is testable without a network.
pub(crate) fn collect_links(
    outlet: &str,
    html: &str,
    base: &Url,
    section: &str,
    limit: usize,
) -> Vec<Candidate> {
    if limit == 0 {
        return Vec::new();
    }

    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let resolved = match base.join(href) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(outlet, href, error = %e, "Skipping malformed link");
                continue;
            }
        };
        if !resolved.path().contains(section) {
            continue;
        }

        let link = resolved.to_string();
        // A href pointing back at the listing itself is navigation, not an
        // article.
        if link == base.as_str() {
            continue;
        }
        if !seen.insert(link.clone()) {
            continue;
        }

        let title = element.text().collect::<Vec<_>>().join(" ");
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        candidates.push(Candidate {
            outlet: outlet.to_string(),
            link,
            title: (!title.is_empty()).then_some(title),
            published_at: None,
            text: None,
        });
        if candidates.len() == limit {
            break;
        }
    }
    candidates
}
