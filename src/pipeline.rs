//! Run orchestration: candidates -> articles -> scores -> summaries.
//!
//! Outlets are processed one at a time, and within an outlet candidates flow
//! sequentially through extraction and scoring; each stage hands a complete
//! sequence to the next. Source-level failures cost only their outlet,
//! per-item failures only their item, so a run always completes with some
//! result once configuration has validated.

use crate::config::RunConfig;
use crate::error::ComparisonError;
use crate::extract::{self, REQUEST_TIMEOUT};
use crate::models::{Article, Candidate, OutletSummary, ScoredArticle};
use crate::normalize;
use crate::scoring::{self, Strategy};
use crate::sources;
use crate::stats::{self, Comparison};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

/// Knobs for one run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Maximum candidates per outlet.
    pub limit: usize,
    /// Character budget for normalized article text.
    pub truncate: usize,
    pub strategy: Strategy,
}

/// A source-level failure, preserved for the final report.
#[derive(Debug)]
pub struct OutletFailure {
    pub outlet: String,
    pub error: String,
}

/// Everything a run produces.
#[derive(Debug)]
pub struct RunReport {
    pub scored: Vec<ScoredArticle>,
    pub summaries: BTreeMap<String, OutletSummary>,
    pub comparison: Option<Comparison>,
    /// Why the comparison was skipped, when it was attempted and declined.
    /// `None` alongside a `None` comparison means it was never applicable
    /// (discrete-label strategy).
    pub comparison_skipped: Option<ComparisonError>,
    pub outlet_failures: Vec<OutletFailure>,
}

/// Execute the full pipeline over the configured outlets.
pub async fn run(config: &RunConfig, options: &PipelineOptions) -> RunReport {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("outlet_bias/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new());
    let scorer = scoring::for_strategy(options.strategy);

    let mut scored: Vec<ScoredArticle> = Vec::new();
    let mut outlet_failures: Vec<OutletFailure> = Vec::new();

    for outlet in &config.outlets {
        info!(outlet = %outlet.name, "Fetching candidates");
        let candidates = match sources::fetch_candidates(
            &client,
            outlet,
            options.limit,
            config.api_key.as_deref(),
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(outlet = %outlet.name, error = %e, "Source failed; outlet yields no articles");
                outlet_failures.push(OutletFailure {
                    outlet: outlet.name.clone(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let candidates = normalize::dedup_candidates(candidates);
        let candidate_count = candidates.len();

        let articles = collect_articles(&client, candidates).await;
        let articles = normalize::normalize(articles, options.truncate);
        let outlet_scored = scoring::score_articles(scorer.as_ref(), articles);

        info!(
            outlet = %outlet.name,
            candidates = candidate_count,
            scored = outlet_scored.len(),
            "Outlet processed"
        );
        scored.extend(outlet_scored);
    }

    let summaries = stats::aggregate(&config.outlets, &scored);

    // The variance test only applies to continuous scores.
    let (comparison, comparison_skipped) = if options.strategy == Strategy::Lexicon {
        let groups: Vec<Vec<f64>> = summaries
            .values()
            .map(|s| s.compound_values())
            .filter(|g| !g.is_empty())
            .collect();
        match stats::compare(&groups) {
            Ok(comparison) => (Some(comparison), None),
            Err(e) => {
                warn!(error = %e, "Comparison skipped; reporting raw summaries only");
                (None, Some(e))
            }
        }
    } else {
        (None, None)
    };

    RunReport {
        scored,
        summaries,
        comparison,
        comparison_skipped,
        outlet_failures,
    }
}

/// Turn candidates into articles, one at a time.
///
/// Candidates that already carry text (the headline-API variant) pass
/// through without a fetch; the rest go through the extractor. Failures are
/// logged and skipped.
pub(crate) async fn collect_articles(client: &Client, candidates: Vec<Candidate>) -> Vec<Article> {
    stream::iter(candidates)
        .then(|candidate| async move {
            if let Some(text) = candidate.text.clone() {
                debug!(link = %candidate.link, "Candidate carries text; skipping extraction");
                return Some(Article {
                    outlet: candidate.outlet,
                    title: candidate.title.unwrap_or_else(|| candidate.link.clone()),
                    text,
                    published_at: candidate.published_at,
                });
            }
            match extract::extract(client, &candidate).await {
                Ok(article) => {
                    debug!(link = %candidate.link, "Extracted article");
                    Some(article)
                }
                Err(e) => {
                    warn!(error = %e, "Extraction failed; skipping candidate");
                    None
                }
            }
        })
        .filter_map(std::future::ready)
        .collect()
        .await
}
