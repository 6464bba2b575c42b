//! Source adapters for acquiring candidate articles.
//!
//! One adapter per acquisition strategy, all behind the same contract:
//! `fetch(..) -> Result<Vec<Candidate>, SourceError>` returning at most
//! `limit` candidates.
//!
//! | Variant | Module | Method | Notes |
//! |---------|--------|--------|-------|
//! | Listing | [`listing`] | HTML scraping | Section-filtered hyperlinks from a listing page |
//! | Feed | [`feed`] | RSS / Atom | Feed order is authoritative, no resorting |
//! | Headline API | [`headline_api`] | Single paged query | Delivers text directly; skips the extractor |
//!
//! A failure fetching or parsing the listing, feed, or API response itself is
//! fatal for that outlet only. Malformed individual entries are logged and
//! skipped.

use crate::error::SourceError;
use crate::models::{AcquisitionEndpoint, Candidate, Outlet};
use reqwest::Client;

pub mod feed;
pub mod headline_api;
pub mod listing;

/// Fetch up to `limit` candidates for one outlet, dispatching on its
/// configured endpoint kind.
pub async fn fetch_candidates(
    client: &Client,
    outlet: &Outlet,
    limit: usize,
    api_key: Option<&str>,
) -> Result<Vec<Candidate>, SourceError> {
    match &outlet.endpoint {
        AcquisitionEndpoint::Listing { url, section } => {
            listing::fetch(client, &outlet.name, url, section, limit).await
        }
        AcquisitionEndpoint::Feed { url } => feed::fetch(client, &outlet.name, url, limit).await,
        AcquisitionEndpoint::HeadlineApi { source_id } => {
            // Config validation guarantees a key when an API outlet exists;
            // this guard keeps the adapter honest if called directly.
            let key = api_key.ok_or_else(|| SourceError::Api {
                source_id: source_id.clone(),
                message: "no API credential configured".to_string(),
            })?;
            headline_api::fetch(client, &outlet.name, source_id, limit, key).await
        }
    }
}
