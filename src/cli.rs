//! Command-line interface, defined with `clap` derive.

use crate::scoring::Strategy;
use clap::Parser;

/// Command-line arguments for a pipeline run.
///
/// # Examples
///
/// ```sh
/// # Built-in outlets, lexicon scoring
/// outlet_bias
///
/// # Custom outlet map, classifier scoring, 15 candidates per outlet
/// outlet_bias -c outlets.yaml -s classifier -l 15
///
/// # Write the scored table for the external visualizer
/// outlet_bias --scored-output ./scored
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML outlet map (defaults to the built-in set)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum candidate articles per outlet
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Sentiment scoring strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::Lexicon)]
    pub strategy: Strategy,

    /// Character budget applied to extracted article text
    #[arg(short, long, default_value_t = 1000)]
    pub truncate: usize,

    /// Headline API key (required only for headline-api outlets)
    #[arg(long, env = "NEWS_API_KEY")]
    pub news_api_key: Option<String>,

    /// Output directory for the scored-table JSON handoff
    #[arg(short = 'o', long)]
    pub scored_output: Option<String>,
}
