//! Sentiment scoring strategies.
//!
//! The strategy is selected once per run, not per article. Both strategies
//! share the [`Scorer`] contract: deterministic, pure with respect to run
//! state, and bounded (scoring is CPU-only; the only blocking is the one-time
//! lexicon initialization on first use).
//!
//! - [`LexiconScorer`]: VADER compound polarity in [-1.0, 1.0]. The
//!   lexicon-and-rule method (negation, intensifiers, punctuation and
//!   capitalization emphasis) is the `vader_sentiment` crate's fixed
//!   capability, not reimplemented here.
//! - [`ClassifierScorer`]: discrete label plus confidence from a pluggable
//!   [`TextClassifier`] backend, with input hard-truncated to 512 characters
//!   before the backend sees it.

use crate::error::ScoringError;
use crate::models::{Article, ScoredArticle, SentimentLabel, SentimentValue};
use crate::normalize::truncate_chars;
use clap::ValueEnum;
use once_cell::sync::Lazy;
use tracing::warn;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Hard input ceiling for classifier backends, in characters. Applied here
/// rather than trusting a backend's own clipping, so the bound is explicit
/// and testable.
pub const CLASSIFIER_INPUT_CEILING: usize = 512;

/// Scoring strategy selected for a run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Lexicon compound polarity (continuous, enables the variance test).
    Lexicon,
    /// Pretrained classifier label + confidence (discrete).
    Classifier,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Lexicon => write!(f, "lexicon"),
            Strategy::Classifier => write!(f, "classifier"),
        }
    }
}

/// Per-article scoring contract shared by both strategies.
pub trait Scorer {
    fn score(&self, text: &str) -> Result<SentimentValue, ScoringError>;
}

/// Build the scorer for a run.
pub fn for_strategy(strategy: Strategy) -> Box<dyn Scorer> {
    match strategy {
        Strategy::Lexicon => Box::new(LexiconScorer),
        Strategy::Classifier => Box::new(ClassifierScorer::new(KeywordClassifier)),
    }
}

// One-time lexicon load, shared process-wide. Read-only after construction,
// so no teardown is needed.
static VADER: Lazy<SentimentIntensityAnalyzer<'static>> =
    Lazy::new(SentimentIntensityAnalyzer::new);

/// Lexicon-based compound-polarity scorer.
pub struct LexiconScorer;

impl Scorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<SentimentValue, ScoringError> {
        let scores = VADER.polarity_scores(text);
        let compound = scores.get("compound").copied().unwrap_or(0.0);
        Ok(SentimentValue::Compound {
            value: compound.clamp(-1.0, 1.0),
        })
    }
}

/// Backend seam for the classifier strategy. A transformer model can be
/// plugged in here without touching the pipeline; tests use recording and
/// failing stubs.
pub trait TextClassifier {
    fn classify(&self, text: &str) -> Result<(SentimentLabel, f64), ScoringError>;
}

/// Classifier-strategy scorer: truncates, delegates, clamps confidence.
pub struct ClassifierScorer<C: TextClassifier> {
    classifier: C,
}

impl<C: TextClassifier> ClassifierScorer<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C: TextClassifier> Scorer for ClassifierScorer<C> {
    fn score(&self, text: &str) -> Result<SentimentValue, ScoringError> {
        let clipped = truncate_chars(text, CLASSIFIER_INPUT_CEILING);
        let (label, confidence) = self.classifier.classify(clipped)?;
        Ok(SentimentValue::Label {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        })
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "win", "success", "gain", "rise", "surge", "approve", "agree", "pass",
    "breakthrough", "progress", "strong", "boost", "improve", "record",
    "optimistic", "confident", "support", "growth",
];

const NEGATIVE_WORDS: &[&str] = &[
    "lose", "fail", "drop", "fall", "crash", "reject", "oppose", "block",
    "crisis", "collapse", "weak", "decline", "worst", "threat", "risk",
    "pessimistic", "concern", "fear", "scandal",
];

/// Built-in classifier backend: a fixed keyword model. Label follows the
/// dominant polarity; confidence grows with the margin between positive and
/// negative hits, from 0.5 (no signal) to 1.0 (one-sided).
pub struct KeywordClassifier;

impl TextClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Result<(SentimentLabel, f64), ScoringError> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower.split_whitespace().collect();

        let pos = words
            .iter()
            .filter(|w| POSITIVE_WORDS.iter().any(|pw| w.contains(pw)))
            .count() as f64;
        let neg = words
            .iter()
            .filter(|w| NEGATIVE_WORDS.iter().any(|nw| w.contains(nw)))
            .count() as f64;

        let denom = pos + neg;
        let label = if pos >= neg {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        let confidence = if denom == 0.0 {
            0.5
        } else {
            0.5 + (pos - neg).abs() / denom / 2.0
        };
        Ok((label, confidence))
    }
}

/// Score a batch. Per-article failures are logged with the article title and
/// dropped; the batch never aborts.
pub fn score_articles(scorer: &dyn Scorer, articles: Vec<Article>) -> Vec<ScoredArticle> {
    articles
        .into_iter()
        .filter_map(|article| match scorer.score(&article.text) {
            Ok(sentiment) => Some(ScoredArticle { article, sentiment }),
            Err(e) => {
                warn!(
                    outlet = %article.outlet,
                    title = %article.title,
                    error = %e,
                    "Scoring failed; dropping article"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn article(outlet: &str, title: &str, text: &str) -> Article {
        Article {
            outlet: outlet.to_string(),
            title: title.to_string(),
            text: text.to_string(),
            published_at: None,
        }
    }

    #[test]
    fn test_lexicon_scorer_deterministic() {
        let scorer = LexiconScorer;
        let text = "The senate passed the landmark bill in a huge win for the coalition.";
        let first = scorer.score(text).unwrap();
        let second = scorer.score(text).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lexicon_scorer_range() {
        let scorer = LexiconScorer;
        let inputs = [
            "",
            "Neutral procedural notice about the committee schedule.",
            "Fantastic, wonderful, amazing, brilliant, superb victory!!!",
            "Horrible, terrible, disastrous, catastrophic failure and scandal!!!",
            "Mixed outcome: some gains, some painful losses.",
        ];
        for input in inputs {
            let value = scorer.score(input).unwrap().compound().unwrap();
            assert!(
                (-1.0..=1.0).contains(&value),
                "compound {value} out of range for {input:?}"
            );
        }
    }

    #[test]
    fn test_lexicon_scorer_polarity_direction() {
        let scorer = LexiconScorer;
        let positive = scorer
            .score("What a wonderful, inspiring success this is!")
            .unwrap()
            .compound()
            .unwrap();
        let negative = scorer
            .score("A horrible disaster, a total catastrophic failure.")
            .unwrap()
            .compound()
            .unwrap();
        assert!(positive > 0.0);
        assert!(negative < 0.0);
    }

    /// Records the character length of every input it receives.
    struct RecordingClassifier {
        lengths: RefCell<Vec<usize>>,
    }

    impl TextClassifier for RecordingClassifier {
        fn classify(&self, text: &str) -> Result<(SentimentLabel, f64), ScoringError> {
            self.lengths.borrow_mut().push(text.chars().count());
            Ok((SentimentLabel::Positive, 0.9))
        }
    }

    #[test]
    fn test_classifier_input_truncated_to_ceiling() {
        let recorder = RecordingClassifier {
            lengths: RefCell::new(Vec::new()),
        };
        let scorer = ClassifierScorer::new(recorder);

        let long = "word ".repeat(400);
        scorer.score(&long).unwrap();
        scorer.score("short").unwrap();

        let lengths = scorer.classifier.lengths.borrow();
        assert_eq!(*lengths, vec![CLASSIFIER_INPUT_CEILING, 5]);
        assert!(lengths.iter().all(|&l| l <= CLASSIFIER_INPUT_CEILING));
    }

    #[test]
    fn test_keyword_classifier_labels() {
        let classifier = KeywordClassifier;
        let (label, confidence) = classifier
            .classify("A strong win and record growth boost confidence")
            .unwrap();
        assert_eq!(label, SentimentLabel::Positive);
        assert!(confidence > 0.5);

        let (label, confidence) = classifier
            .classify("Markets crash amid fear of crisis and scandal")
            .unwrap();
        assert_eq!(label, SentimentLabel::Negative);
        assert!(confidence > 0.5);

        let (label, confidence) = classifier
            .classify("The committee met to discuss the schedule")
            .unwrap();
        assert_eq!(label, SentimentLabel::Positive);
        assert!((confidence - 0.5).abs() < 1e-12);
    }

    /// Fails on the nth call, succeeds otherwise.
    struct FlakyScorer {
        calls: RefCell<usize>,
        fail_on: usize,
    }

    impl Scorer for FlakyScorer {
        fn score(&self, _text: &str) -> Result<SentimentValue, ScoringError> {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            if *calls == self.fail_on {
                Err(ScoringError::Classifier("model refused input".to_string()))
            } else {
                Ok(SentimentValue::Compound { value: 0.0 })
            }
        }
    }

    #[test]
    fn test_partial_scoring_failure_drops_only_failing_article() {
        let scorer = FlakyScorer {
            calls: RefCell::new(0),
            fail_on: 3,
        };
        let articles: Vec<Article> = (1..=5)
            .map(|i| article("CNN", &format!("story-{i}"), "some body text"))
            .collect();

        let scored = score_articles(&scorer, articles);
        assert_eq!(scored.len(), 4);
        let titles: Vec<&str> = scored.iter().map(|s| s.article.title.as_str()).collect();
        assert_eq!(titles, vec!["story-1", "story-2", "story-4", "story-5"]);
    }
}
