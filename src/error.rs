//! Error taxonomy for the pipeline.
//!
//! Only [`ConfigError`] escalates to run termination. Everything else is
//! scoped to the single outlet or item it concerns: the pipeline logs it and
//! moves on, so a run always produces some result when configuration is
//! valid.

use thiserror::Error;

/// Fatal configuration problems, raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no outlets configured")]
    EmptyOutlets,

    #[error("duplicate outlet name: {0}")]
    DuplicateOutlet(String),

    #[error("{var} is required when a headline-api outlet is configured")]
    MissingCredential { var: &'static str },

    #[error("failed to read outlet config {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse outlet config {path}: {source}")]
    Malformed {
        path: String,
        source: serde_yaml::Error,
    },
}

/// A listing page, feed, or API query that could not be fetched or parsed.
/// Fatal for that outlet only; the run continues with the others.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request for {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid listing url {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("could not parse {url} as RSS or Atom")]
    UnparsableFeed { url: String },

    #[error("headline api error for {source_id}: {message}")]
    Api { source_id: String, message: String },
}

/// Why a single candidate failed to become an article.
#[derive(Debug, Error)]
pub enum ExtractionCause {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("no paragraph text found")]
    EmptyBody,
}

/// Per-item extraction failure carrying the offending link. Logged and
/// skipped, never fatal to the batch.
#[derive(Debug, Error)]
#[error("extraction failed for {link}: {cause}")]
pub struct ExtractionFailure {
    pub link: String,
    #[source]
    pub cause: ExtractionCause,
}

/// Per-item scoring failure. Logged and the article dropped from results.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("classifier failed: {0}")]
    Classifier(String),
}

/// The variance test was asked for under conditions where it is not
/// well-defined. Recoverable: raw summaries are still reported, only the
/// verdict is omitted.
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("need at least two non-empty outlet groups, got {0}")]
    NotEnoughGroups(usize),

    #[error("degenerate comparison input: {0}")]
    Degenerate(String),
}
