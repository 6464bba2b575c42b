//! Article retrieval and text extraction.
//!
//! The highest-failure-rate stage of the pipeline: network errors, malformed
//! markup, and paywalled or empty pages all end up here. Every failure maps
//! to an [`ExtractionFailure`] carrying the offending link; the pipeline logs
//! and skips it, never aborting the batch.
//!
//! Extraction is heuristic-first with a structural fallback: body text comes
//! from paragraphs inside `article` or `main` elements when the page has
//! them, otherwise from every paragraph in the document.

use crate::error::{ExtractionCause, ExtractionFailure};
use crate::models::{Article, Candidate};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bound on each article retrieval.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieve a candidate's page and extract a normalized article from it.
#[instrument(level = "debug", skip_all, fields(link = %candidate.link))]
pub async fn extract(client: &Client, candidate: &Candidate) -> Result<Article, ExtractionFailure> {
    let fail = |cause| ExtractionFailure {
        link: candidate.link.clone(),
        cause,
    };

    let response = client
        .get(&candidate.link)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| fail(ExtractionCause::Request(e)))?;
    if !response.status().is_success() {
        return Err(fail(ExtractionCause::Status(response.status().as_u16())));
    }
    // `text()` decodes with replacement characters, so encoding anomalies
    // degrade instead of erroring; truly undecodable bodies come back empty
    // and fall out as EmptyBody.
    let body = response
        .text()
        .await
        .map_err(|e| fail(ExtractionCause::Request(e)))?;

    from_html(candidate, &body)
}

/// Extract title, publication timestamp, and body text from page markup.
pub(crate) fn from_html(candidate: &Candidate, html: &str) -> Result<Article, ExtractionFailure> {
    let document = Html::parse_document(html);

    let text = paragraph_text(&document);
    if text.is_empty() {
        return Err(ExtractionFailure {
            link: candidate.link.clone(),
            cause: ExtractionCause::EmptyBody,
        });
    }

    let title = candidate
        .title
        .clone()
        .or_else(|| page_title(&document))
        .unwrap_or_else(|| candidate.link.clone());
    let published_at = candidate
        .published_at
        .clone()
        .or_else(|| published_meta(&document));

    debug!(bytes = text.len(), "Extracted article text");
    Ok(Article {
        outlet: candidate.outlet.clone(),
        title,
        text,
        published_at,
    })
}

fn paragraph_text(document: &Html) -> String {
    let article_selector = Selector::parse("article p, main p").unwrap();
    let fallback_selector = Selector::parse("p").unwrap();

    let collect = |selector: &Selector| {
        document
            .select(selector)
            .map(|p| p.text().collect::<Vec<_>>().join(" "))
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let text = collect(&article_selector);
    if !text.is_empty() {
        return text;
    }
    collect(&fallback_selector)
}

fn page_title(document: &Html) -> Option<String> {
    let h1_selector = Selector::parse("h1").unwrap();
    let title_selector = Selector::parse("title").unwrap();

    for selector in [&h1_selector, &title_selector] {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn published_meta(document: &Html) -> Option<String> {
    let meta_selector = Selector::parse(r#"meta[property="article:published_time"]"#).unwrap();
    document
        .select(&meta_selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::to_string)
}
