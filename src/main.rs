//! # Outlet Bias
//!
//! Collects political news articles from several outlets, scores each
//! article's emotional valence, and compares the resulting sentiment
//! distributions across outlets to surface evidence of outlet-level bias.
//!
//! ## Usage
//!
//! ```sh
//! outlet_bias                       # built-in outlets, lexicon scoring
//! outlet_bias -c outlets.yaml -s classifier -l 15
//! outlet_bias --scored-output ./scored
//! ```
//!
//! ## Architecture
//!
//! A strict left-to-right pipeline:
//! 1. **Source adapters**: listing scrape, RSS/Atom feed, or headline API,
//!    per outlet configuration
//! 2. **Extraction**: bounded HTTP retrieval plus paragraph-level text
//!    extraction (API-delivered text skips this stage)
//! 3. **Normalization**: link dedup, empty-drop, character-bounded truncation
//! 4. **Scoring**: lexicon compound polarity or classifier label+confidence
//! 5. **Aggregation**: per-outlet summaries and, for continuous scores, a
//!    one-way ANOVA across outlets with a fixed p < 0.05 verdict

use clap::Parser;
use std::error::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scoring;
mod sources;
mod stats;

use cli::Cli;
use outputs::json::ScoredTable;
use pipeline::PipelineOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("outlet_bias starting up");

    let args = Cli::parse();

    // Configuration problems are the only fatal errors; everything past this
    // point degrades per outlet or per item.
    let config = match config::load(args.config.as_deref(), args.news_api_key.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let options = PipelineOptions {
        limit: args.limit,
        truncate: args.truncate,
        strategy: args.strategy,
    };
    info!(
        outlets = config.outlets.len(),
        limit = options.limit,
        truncate = options.truncate,
        strategy = ?options.strategy,
        "Starting pipeline run"
    );

    let report = pipeline::run(&config, &options).await;

    // ---- Console report ----
    for summary in report.summaries.values() {
        match summary.mean_compound() {
            Some(mean) => info!(
                outlet = %summary.outlet,
                articles = summary.values.len(),
                mean_compound = %format!("{mean:.4}"),
                "Outlet summary"
            ),
            None => {
                let counts = summary.label_counts();
                if counts.is_empty() {
                    info!(outlet = %summary.outlet, articles = 0, "Outlet summary");
                } else {
                    let counts = counts
                        .iter()
                        .map(|(label, n)| format!("{label}={n}"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    info!(
                        outlet = %summary.outlet,
                        articles = summary.values.len(),
                        labels = %counts,
                        "Outlet summary"
                    );
                }
            }
        }
    }
    for failure in &report.outlet_failures {
        warn!(outlet = %failure.outlet, error = %failure.error, "Outlet produced no articles");
    }
    info!(total = report.scored.len(), "Total scored articles");

    match &report.comparison {
        Some(comparison) => info!(
            f_statistic = %format!("{:.2}", comparison.statistic),
            p_value = %format!("{:.4}", comparison.p_value),
            verdict = comparison.verdict(),
            "ANOVA across outlets"
        ),
        None => {
            if let Some(reason) = &report.comparison_skipped {
                info!(reason = %reason, "Comparison not run");
            }
        }
    }

    // ---- Visualizer handoff ----
    if let Some(ref output_dir) = args.scored_output {
        let table = ScoredTable {
            generated_at: chrono::Local::now().to_rfc3339(),
            strategy: args.strategy.to_string(),
            rows: &report.scored,
            summaries: &report.summaries,
            comparison: report.comparison,
        };
        if let Err(e) = outputs::json::write_scored_table(&table, output_dir).await {
            error!(error = %e, "Failed to write scored table");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );

    Ok(())
}
