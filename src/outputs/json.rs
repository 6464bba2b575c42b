//! JSON scored-table output for the external visualizer.
//!
//! # Output Structure
//!
//! ```text
//! scored_output_dir/
//! └── 2026-08-26/
//!     └── scored.json
//! ```

use crate::models::{OutletSummary, ScoredArticle};
use crate::stats::Comparison;
use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// The handoff document: run metadata, one row per scored article, the
/// per-outlet summaries, and the comparison when one was run.
#[derive(Debug, Serialize)]
pub struct ScoredTable<'a> {
    pub generated_at: String,
    pub strategy: String,
    pub rows: &'a [ScoredArticle],
    pub summaries: &'a BTreeMap<String, OutletSummary>,
    pub comparison: Option<Comparison>,
}

/// Write the scored table under a date directory.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_scored_table(
    table: &ScoredTable<'_>,
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(table)?;

    let date = Local::now().date_naive().to_string();
    let dir = format!("{}/{}", output_dir.trim_end_matches('/'), date);
    if let Err(e) = fs::create_dir_all(&dir).await {
        error!(%dir, error = %e, "Failed to create scored-output dir");
        return Err(e.into());
    }

    let path = format!("{dir}/scored.json");
    fs::write(&path, json).await?;
    info!(%path, rows = table.rows.len(), "Wrote scored table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, SentimentValue};

    #[test]
    fn test_scored_table_shape() {
        let rows = vec![ScoredArticle {
            article: Article {
                outlet: "CNN".to_string(),
                title: "Story".to_string(),
                text: "Body".to_string(),
                published_at: Some("Tue, 25 Aug 2026 09:00:00 GMT".to_string()),
            },
            sentiment: SentimentValue::Compound { value: 0.25 },
        }];
        let summaries = BTreeMap::from([(
            "CNN".to_string(),
            OutletSummary {
                outlet: "CNN".to_string(),
                values: vec![SentimentValue::Compound { value: 0.25 }],
            },
        )]);
        let table = ScoredTable {
            generated_at: "2026-08-26T00:00:00Z".to_string(),
            strategy: "lexicon".to_string(),
            rows: &rows,
            summaries: &summaries,
            comparison: None,
        };

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["rows"][0]["outlet"], "CNN");
        assert_eq!(json["rows"][0]["text"], "Body");
        assert_eq!(json["rows"][0]["sentiment"]["value"], 0.25);
        assert_eq!(json["summaries"]["CNN"]["values"][0]["kind"], "compound");
        assert!(json["comparison"].is_null());
    }
}
