//! Orchestration interfaces.

use std::time::Duration;

use bestquote_core::quote::Quote;
use bestquote_core::task::FetchError;

/// Outcome of a single fetch task.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Source name.
    pub source: String,
    /// The fetched quote or a structured error.
    pub outcome: Result<Quote, FetchError>,
    /// Wall-clock time the fetch took.
    pub duration: Duration,
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present the winning quote.
    fn present_best(&self, quote: &Quote, elapsed: Duration, details: bool);

    /// Present the per-source outcomes of a batch.
    fn present_outcomes(&self, outcomes: &[FetchOutcome]);

    /// Present an error.
    fn present_error(&self, error: &str);
}
