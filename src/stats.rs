//! Per-outlet aggregation and the one-way variance-ratio comparison.
//!
//! Aggregation is strictly by outlet name with stable grouping: every
//! configured outlet appears in the output, with an empty sequence if it
//! contributed nothing. The comparison is a one-way ANOVA F-test across all
//! non-empty outlet groups simultaneously, with the p < 0.05 decision rule a
//! fixed constant of the design.

use crate::error::ComparisonError;
use crate::models::{Outlet, OutletSummary, ScoredArticle};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};
use std::collections::BTreeMap;
use tracing::warn;

/// Fixed significance threshold for the comparison verdict.
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Result of the variance-ratio test across outlet groups.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Comparison {
    pub statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

impl Comparison {
    pub fn verdict(&self) -> &'static str {
        if self.significant {
            "statistically significant difference"
        } else {
            "no significant difference"
        }
    }
}

/// Group scored articles by outlet. Keys come from the configured outlet
/// list, so an outlet with zero scored articles still appears. A scored
/// article naming an outlet outside that list is logged and left out of
/// every summary.
pub fn aggregate(outlets: &[Outlet], scored: &[ScoredArticle]) -> BTreeMap<String, OutletSummary> {
    let mut summaries: BTreeMap<String, OutletSummary> = outlets
        .iter()
        .map(|o| {
            (
                o.name.clone(),
                OutletSummary {
                    outlet: o.name.clone(),
                    values: Vec::new(),
                },
            )
        })
        .collect();

    for item in scored {
        match summaries.get_mut(&item.article.outlet) {
            Some(summary) => summary.values.push(item.sentiment),
            None => warn!(
                outlet = %item.article.outlet,
                title = %item.article.title,
                "Scored article names an unconfigured outlet; excluded from summaries"
            ),
        }
    }
    summaries
}

/// One-way ANOVA across outlet groups of continuous scores.
///
/// Empty groups are excluded before the test; fewer than two non-empty
/// groups is a usage error, not a silent zero result.
pub fn compare(groups: &[Vec<f64>]) -> Result<Comparison, ComparisonError> {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|g| !g.is_empty()).collect();
    if groups.len() < 2 {
        return Err(ComparisonError::NotEnoughGroups(groups.len()));
    }

    let k = groups.len() as f64;
    let n: usize = groups.iter().map(|g| g.len()).sum();
    let df_within = n as f64 - k;
    if df_within <= 0.0 {
        return Err(ComparisonError::Degenerate(
            "no within-group degrees of freedom".to_string(),
        ));
    }

    let grand_mean: f64 = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n as f64;
    let group_means: Vec<f64> = groups
        .iter()
        .map(|g| g.iter().sum::<f64>() / g.len() as f64)
        .collect();

    let ss_between: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, mean)| g.len() as f64 * (mean - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(&group_means)
        .map(|(g, mean)| g.iter().map(|x| (x - mean).powi(2)).sum::<f64>())
        .sum();

    let df_between = k - 1.0;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;

    if ms_within == 0.0 {
        if ms_between == 0.0 {
            return Err(ComparisonError::Degenerate(
                "all groups constant and equal".to_string(),
            ));
        }
        // Perfect separation with zero within-group variance.
        return Ok(Comparison {
            statistic: f64::INFINITY,
            p_value: 0.0,
            significant: true,
        });
    }

    let statistic = ms_between / ms_within;
    let dist = FisherSnedecor::new(df_between, df_within)
        .map_err(|e| ComparisonError::Degenerate(e.to_string()))?;
    let p_value = 1.0 - dist.cdf(statistic);

    Ok(Comparison {
        statistic,
        p_value,
        significant: p_value < SIGNIFICANCE_THRESHOLD,
    })
}
