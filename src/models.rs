//! Data models for the ingestion-scoring-comparison pipeline.
//!
//! Everything flows left to right: a [`Candidate`] produced by a source
//! adapter becomes an [`Article`] after extraction and normalization, then a
//! [`ScoredArticle`] after sentiment scoring, and finally contributes to an
//! [`OutletSummary`] during aggregation. No stage mutates an earlier stage's
//! output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// How candidate articles are acquired for an outlet.
///
/// A small closed set of variants keeps the rest of the pipeline
/// acquisition-agnostic: the outlet map in the YAML config tags each entry
/// with one of these kinds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AcquisitionEndpoint {
    /// Scrape hyperlinks from a listing page whose paths contain `section`.
    Listing { url: String, section: String },
    /// Take entries from an RSS or Atom feed in feed order.
    Feed { url: String },
    /// Query a headline API for a source identifier. Delivers article text
    /// directly, so these candidates skip the extractor stage.
    HeadlineApi { source_id: String },
}

/// A configured news outlet: a unique name plus one acquisition endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Outlet {
    pub name: String,
    pub endpoint: AcquisitionEndpoint,
}

/// A raw, unverified pointer to a potential article.
///
/// Produced by a source adapter, consumed (and discarded) by the extractor.
/// `published_at` is whatever string the source supplied, kept verbatim.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub outlet: String,
    pub link: String,
    pub title: Option<String>,
    pub published_at: Option<String>,
    /// Populated only by the headline-API adapter, which delivers body text
    /// up front instead of a page to extract.
    pub text: Option<String>,
}

/// A successfully extracted document. `text` is always non-empty; the
/// normalizer drops anything that would violate that.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub outlet: String,
    pub title: String,
    pub text: String,
    pub published_at: Option<String>,
}

/// Discrete sentiment label produced by the classifier strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// Per-article sentiment, tagged by the strategy that produced it.
///
/// The aggregator branches on this tag exactly once, when deciding whether a
/// variance test applies (it does only for continuous compound scores).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentimentValue {
    /// Lexicon compound polarity in [-1.0, 1.0].
    Compound { value: f64 },
    /// Classifier label with confidence in [0.0, 1.0].
    Label {
        label: SentimentLabel,
        confidence: f64,
    },
}

impl SentimentValue {
    /// The continuous compound score, if this value came from the lexicon
    /// strategy.
    pub fn compound(&self) -> Option<f64> {
        match self {
            SentimentValue::Compound { value } => Some(*value),
            SentimentValue::Label { .. } => None,
        }
    }
}

impl fmt::Display for SentimentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentValue::Compound { value } => write!(f, "{value:.4}"),
            SentimentValue::Label { label, confidence } => {
                write!(f, "{label} ({confidence:.2})")
            }
        }
    }
}

/// Terminal pipeline entity: an article plus its sentiment. Handed off to the
/// aggregator and, as a row of the scored table, to the external visualizer.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub sentiment: SentimentValue,
}

/// Aggregate view of one outlet's scored articles, recomputed each run.
#[derive(Debug, Clone, Serialize)]
pub struct OutletSummary {
    pub outlet: String,
    pub values: Vec<SentimentValue>,
}

impl OutletSummary {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Continuous scores in article order. Empty for classifier runs.
    pub fn compound_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(|v| v.compound()).collect()
    }

    /// Mean compound score, if any continuous scores were recorded.
    pub fn mean_compound(&self) -> Option<f64> {
        let values = self.compound_values();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }

    /// Count of articles per discrete label. Empty for lexicon runs.
    pub fn label_counts(&self) -> BTreeMap<SentimentLabel, usize> {
        let mut counts = BTreeMap::new();
        for value in &self.values {
            if let SentimentValue::Label { label, .. } = value {
                *counts.entry(*label).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl PartialOrd for SentimentLabel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SentimentLabel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        fn rank(label: &SentimentLabel) -> u8 {
            match label {
                SentimentLabel::Negative => 0,
                SentimentLabel::Positive => 1,
            }
        }
        rank(self).cmp(&rank(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_value_compound_accessor() {
        let compound = SentimentValue::Compound { value: 0.42 };
        assert_eq!(compound.compound(), Some(0.42));

        let label = SentimentValue::Label {
            label: SentimentLabel::Positive,
            confidence: 0.9,
        };
        assert_eq!(label.compound(), None);
    }

    #[test]
    fn test_scored_article_serializes_flat_row() {
        let scored = ScoredArticle {
            article: Article {
                outlet: "CNN".to_string(),
                title: "Test".to_string(),
                text: "Body".to_string(),
                published_at: None,
            },
            sentiment: SentimentValue::Compound { value: -0.5 },
        };

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["outlet"], "CNN");
        assert_eq!(json["text"], "Body");
        assert_eq!(json["sentiment"]["kind"], "compound");
        assert_eq!(json["sentiment"]["value"], -0.5);
    }

    #[test]
    fn test_endpoint_deserializes_tagged_yaml() {
        let yaml = r#"
name: Fox News
endpoint:
  kind: feed
  url: http://feeds.foxnews.com/foxnews/politics
"#;
        let outlet: Outlet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(outlet.name, "Fox News");
        assert!(matches!(outlet.endpoint, AcquisitionEndpoint::Feed { .. }));
    }

    #[test]
    fn test_summary_mean_and_label_counts() {
        let summary = OutletSummary {
            outlet: "NYT".to_string(),
            values: vec![
                SentimentValue::Compound { value: 0.5 },
                SentimentValue::Compound { value: -0.5 },
                SentimentValue::Compound { value: 0.3 },
            ],
        };
        let mean = summary.mean_compound().unwrap();
        assert!((mean - 0.1).abs() < 1e-12);
        assert!(summary.label_counts().is_empty());

        let labeled = OutletSummary {
            outlet: "NYT".to_string(),
            values: vec![
                SentimentValue::Label {
                    label: SentimentLabel::Positive,
                    confidence: 0.8,
                },
                SentimentValue::Label {
                    label: SentimentLabel::Negative,
                    confidence: 0.7,
                },
                SentimentValue::Label {
                    label: SentimentLabel::Positive,
                    confidence: 0.6,
                },
            ],
        };
        let counts = labeled.label_counts();
        assert_eq!(counts[&SentimentLabel::Positive], 2);
        assert_eq!(counts[&SentimentLabel::Negative], 1);
        assert!(labeled.mean_compound().is_none());
    }
}
