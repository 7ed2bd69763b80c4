//! Fetch-task trait and the error taxonomy.
//!
//! `FetchTask` is the unit the aggregator scatters over a worker pool:
//! a zero-input, latency-bearing operation producing one `Quote`.

use crate::cancel::CancellationToken;
use crate::quote::Quote;

/// Error type for quote fetching and aggregation.
// Display and Error are implemented by hand: `thiserror` unconditionally
// treats a field named `source` as the error source, which requires
// `String: std::error::Error`.
#[derive(Debug, Clone)]
pub enum FetchError {
    /// An individual fetch failed. Carries the task identity and cause.
    Task { source: String, cause: String },

    /// No fetch tasks were supplied.
    EmptyTaskSet,

    /// Every task in the batch failed.
    AllFailed(usize),

    /// The operation was cancelled.
    Cancelled,

    /// The join point's deadline expired.
    Timeout(String),

    /// Configuration error (unknown source, bad selection).
    Config(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task { source, cause } => {
                write!(f, "fetch from {source} failed: {cause}")
            }
            Self::EmptyTaskSet => write!(f, "no fetch tasks supplied"),
            Self::AllFailed(n) => write!(f, "all {n} fetch tasks failed"),
            Self::Cancelled => write!(f, "fetch cancelled"),
            Self::Timeout(msg) => write!(f, "fetch timed out: {msg}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// A zero-input operation producing one quote after an unpredictable delay.
///
/// Implementations share no mutable state with each other; the aggregator
/// may run any number of them concurrently on one worker pool. The task set
/// is fixed before dispatch and never retried by the aggregator.
pub trait FetchTask: Send + Sync {
    /// Fetch a quote, observing the cancellation token at suspension points.
    fn fetch(&self, cancel: &CancellationToken) -> Result<Quote, FetchError>;

    /// Name identifying this task in outcomes and errors.
    fn name(&self) -> &str;
}

/// Adapter turning a closure into a named `FetchTask`.
pub struct FnFetchTask<F> {
    name: String,
    f: F,
}

impl<F> FnFetchTask<F>
where
    F: Fn(&CancellationToken) -> Result<Quote, FetchError> + Send + Sync,
{
    /// Wrap a closure as a fetch task with the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> FetchTask for FnFetchTask<F>
where
    F: Fn(&CancellationToken) -> Result<Quote, FetchError> + Send + Sync,
{
    fn fetch(&self, cancel: &CancellationToken) -> Result<Quote, FetchError> {
        (self.f)(cancel)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
