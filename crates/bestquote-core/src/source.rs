//! Simulated market-data sources.
//!
//! One parameterized fetcher replaces per-call-site inline closures: each
//! source carries its own price range, latency range, and RNG.

use std::ops::Range;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::cancel::CancellationToken;
use crate::quote::Quote;
use crate::task::{FetchError, FetchTask};

/// Default latency range for simulated feeds, in milliseconds.
pub const DEFAULT_LATENCY_MS: Range<u64> = 80..120;

/// Granularity of cancellation checks while sleeping.
const SLEEP_SLICE: Duration = Duration::from_millis(5);

/// A simulated feed producing quotes with randomized latency and price.
pub struct SimulatedSource {
    name: String,
    symbol: String,
    price_range: Range<f64>,
    latency_ms: Range<u64>,
    rng: Mutex<StdRng>,
    fail: bool,
}

impl SimulatedSource {
    /// Create a source with the default latency range and an entropy-seeded RNG.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, price_range: Range<f64>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            price_range,
            latency_ms: DEFAULT_LATENCY_MS,
            rng: Mutex::new(StdRng::from_entropy()),
            fail: false,
        }
    }

    /// Override the latency range (milliseconds). The range must be non-empty.
    #[must_use]
    pub fn with_latency(mut self, latency_ms: Range<u64>) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Seed the RNG for deterministic prices and latencies.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Make every fetch fail after its latency, simulating a feed outage.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Sleep in slices, checking the token between slices so race losers
    /// can stop early.
    fn sleep_cooperatively(
        &self,
        total: Duration,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        let mut remaining = total;
        while remaining > Duration::ZERO {
            cancel.check_cancelled()?;
            let step = remaining.min(SLEEP_SLICE);
            thread::sleep(step);
            remaining = remaining.saturating_sub(step);
        }
        cancel.check_cancelled()
    }
}

impl FetchTask for SimulatedSource {
    fn fetch(&self, cancel: &CancellationToken) -> Result<Quote, FetchError> {
        cancel.check_cancelled()?;
        let (latency_ms, price) = {
            let mut rng = self.rng.lock();
            (
                rng.gen_range(self.latency_ms.clone()),
                rng.gen_range(self.price_range.clone()),
            )
        };
        trace!(source = %self.name, latency_ms, "simulated fetch");
        self.sleep_cooperatively(Duration::from_millis(latency_ms), cancel)?;

        if self.fail {
            return Err(FetchError::Task {
                source: self.name.clone(),
                cause: "simulated feed outage".into(),
            });
        }
        Ok(Quote::new(&self.name, &self.symbol, price))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
