//! Candidate deduplication and article text bounding.
//!
//! Applied between extraction and scoring: duplicate links are collapsed
//! before extraction is attempted (set semantics, first occurrence wins),
//! empty extractions are dropped, and surviving text is truncated to a
//! character budget. Truncation cuts at a character boundary with no attempt
//! to preserve word boundaries; the bound exists because classifier scoring
//! has an input-length ceiling, and it is applied under the lexicon strategy
//! too to keep aggregation scale-bounded.

use crate::models::{Article, Candidate};
use itertools::Itertools;
use tracing::debug;

/// Collapse candidates sharing a link, keeping the first occurrence so
/// source order survives.
pub fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let before = candidates.len();
    let deduped: Vec<Candidate> = candidates
        .into_iter()
        .unique_by(|c| c.link.clone())
        .collect();
    if deduped.len() < before {
        debug!(
            dropped = before - deduped.len(),
            "Dropped duplicate candidate links"
        );
    }
    deduped
}

/// Truncate to at most `bound` characters, cutting on a char boundary.
pub fn truncate_chars(text: &str, bound: usize) -> &str {
    match text.char_indices().nth(bound) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Drop empty articles and bound the text of the rest.
pub fn normalize(articles: Vec<Article>, bound: usize) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|a| !a.text.trim().is_empty())
        .map(|mut a| {
            if a.text.chars().count() > bound {
                a.text = truncate_chars(&a.text, bound).to_string();
            }
            a
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(link: &str) -> Candidate {
        Candidate {
            outlet: "CNN".to_string(),
            link: link.to_string(),
            title: None,
            published_at: None,
            text: None,
        }
    }

    fn article(text: &str) -> Article {
        Article {
            outlet: "CNN".to_string(),
            title: "Title".to_string(),
            text: text.to_string(),
            published_at: None,
        }
    }

    #[test]
    fn test_duplicate_links_collapse_to_one() {
        let candidates = vec![
            candidate("https://example.com/a"),
            candidate("https://example.com/b"),
            candidate("https://example.com/a"),
        ];
        let deduped = dedup_candidates(candidates);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].link, "https://example.com/a");
        assert_eq!(deduped[1].link, "https://example.com/b");
    }

    #[test]
    fn test_truncation_exact_bound() {
        let long = "a".repeat(1500);
        assert_eq!(truncate_chars(&long, 1000).chars().count(), 1000);

        let short = "short text";
        assert_eq!(truncate_chars(short, 1000), short);

        let exact = "x".repeat(1000);
        assert_eq!(truncate_chars(&exact, 1000), exact);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let text = "é".repeat(10);
        let truncated = truncate_chars(&text, 5);
        assert_eq!(truncated.chars().count(), 5);
        assert_eq!(truncated, "ééééé");
    }

    #[test]
    fn test_normalize_drops_empty_and_bounds_text() {
        let articles = vec![
            article(""),
            article("   "),
            article(&"b".repeat(50)),
            article(&"c".repeat(5)),
        ];
        let normalized = normalize(articles, 10);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].text.chars().count(), 10);
        assert_eq!(normalized[1].text, "ccccc");
    }
}
