//! Application configuration from CLI flags and environment.

use clap::Parser;

/// BestQuote — concurrent best-of market-data fetch.
#[derive(Parser, Debug)]
#[command(name = "bestquote", version, about)]
pub struct AppConfig {
    /// Sources to query: "all" or a comma-separated list.
    #[arg(short, long, default_value = "all", env = "BESTQUOTE_SOURCES")]
    pub sources: String,

    /// Aggregation mode: all (wait for every source), race (first wins),
    /// or sync (sequential baseline).
    #[arg(short, long, default_value = "all")]
    pub mode: String,

    /// Ticker symbol to fetch.
    #[arg(long, default_value = "META", env = "BESTQUOTE_SYMBOL")]
    pub symbol: String,

    /// Abort the whole batch on the first source failure.
    #[arg(long)]
    pub fail_fast: bool,

    /// Pick the highest price instead of the lowest.
    #[arg(long)]
    pub descending: bool,

    /// Worker threads in the fetch pool.
    #[arg(long, default_value = "4")]
    pub threads: usize,

    /// Timeout for the whole batch (e.g. "5s", "500ms", "1m").
    #[arg(long, default_value = "30s")]
    pub timeout: String,

    /// Seed for the simulated feeds (deterministic prices and latencies).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run the chained store-and-email pipeline on the winning source.
    #[arg(long)]
    pub pipeline: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show detailed information.
    #[arg(short, long)]
    pub details: bool,

    /// Quiet mode (only output the winning price).
    #[arg(short, long)]
    pub quiet: bool,

    /// Output file path for the winning quote.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the timeout string into a Duration.
    #[must_use]
    pub fn timeout_duration(&self) -> std::time::Duration {
        parse_duration(&self.timeout).unwrap_or(std::time::Duration::from_secs(30))
    }
}

/// Parse a duration string like "5s", "500ms", "1m", "1h".
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(std::time::Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 3600))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    }
}
