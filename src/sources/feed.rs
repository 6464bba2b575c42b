//! Syndication-feed source adapter.
//!
//! Fetches a feed document and takes the first `limit` entries in feed order;
//! feed order is authoritative and never resorted. The same bytes are tried
//! as RSS first, then Atom. Entry link, title, and published timestamp are
//! surfaced verbatim; entries without a link are skipped and logged.

use crate::error::SourceError;
use crate::models::Candidate;
use reqwest::Client;
use tracing::{info, warn};

pub async fn fetch(
    client: &Client,
    outlet: &str,
    url: &str,
    limit: usize,
) -> Result<Vec<Candidate>, SourceError> {
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
    let bytes = response.bytes().await.map_err(|e| SourceError::Request {
        url: url.to_string(),
        source: e,
    })?;

    let candidates = parse_feed(outlet, &bytes, limit).ok_or_else(|| SourceError::UnparsableFeed {
        url: url.to_string(),
    })?;
    info!(outlet, count = candidates.len(), feed = url, "Indexed feed candidates");
    Ok(candidates)
}

/// Parse feed bytes as RSS, falling back to Atom. `None` means the document
/// is neither.
pub(crate) fn parse_feed(outlet: &str, bytes: &[u8], limit: usize) -> Option<Vec<Candidate>> {
    if let Ok(channel) = rss::Channel::read_from(bytes) {
        return Some(rss_candidates(outlet, &channel, limit));
    }
    if let Ok(feed) = atom_syndication::Feed::read_from(bytes) {
        return Some(atom_candidates(outlet, &feed, limit));
    }
    None
}

fn rss_candidates(outlet: &str, channel: &rss::Channel, limit: usize) -> Vec<Candidate> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let Some(link) = item.link() else {
                warn!(outlet, title = ?item.title(), "Skipping feed entry without link");
                return None;
            };
            Some(Candidate {
                outlet: outlet.to_string(),
                link: link.to_string(),
                title: item.title().map(str::to_string),
                published_at: item.pub_date().map(str::to_string),
                text: None,
            })
        })
        .take(limit)
        .collect()
}

fn atom_candidates(outlet: &str, feed: &atom_syndication::Feed, limit: usize) -> Vec<Candidate> {
    feed.entries()
        .iter()
        .filter_map(|entry| {
            let Some(link) = entry.links().first() else {
                warn!(outlet, title = %entry.title().as_str(), "Skipping feed entry without link");
                return None;
            };
            Some(Candidate {
                outlet: outlet.to_string(),
                link: link.href().to_string(),
                title: Some(entry.title().as_str().to_string()),
                published_at: entry.published().map(|d| d.to_rfc2822()),
                text: None,
            })
        })
        .take(limit)
        .collect()
}
