//! Source factory and registry.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::source::SimulatedSource;
use crate::task::{FetchError, FetchTask};

/// Factory trait for creating fetch tasks by source name.
pub trait SourceFactory: Send + Sync {
    /// Get or create a fetch task for the named source.
    fn get(&self, name: &str) -> Result<Arc<dyn FetchTask>, FetchError>;

    /// List all available source names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory producing the built-in simulated feeds, with lazy
/// creation and a cache keyed by source name.
pub struct DefaultFactory {
    symbol: String,
    seed: Option<u64>,
    cache: RwLock<HashMap<String, Arc<dyn FetchTask>>>,
}

impl DefaultFactory {
    /// Create a factory for the given symbol. A seed makes every feed's
    /// prices and latencies deterministic.
    #[must_use]
    pub fn new(symbol: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            symbol: symbol.into(),
            seed,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn price_range(name: &str) -> Option<Range<f64>> {
        match name {
            "reuters" => Some(40.0..60.0),
            "bloomberg" => Some(30.0..70.0),
            "exegy" => Some(40.0..80.0),
            _ => None,
        }
    }

    fn display_name(name: &str) -> &'static str {
        match name {
            "reuters" => "Reuters",
            "bloomberg" => "Bloomberg",
            "exegy" => "Exegy",
            _ => unreachable!("checked by price_range"),
        }
    }

    fn create_source(&self, name: &str) -> Result<Arc<dyn FetchTask>, FetchError> {
        let Some(prices) = Self::price_range(name) else {
            return Err(FetchError::Config(format!("unknown source: {name}")));
        };
        let mut source = SimulatedSource::new(Self::display_name(name), &self.symbol, prices);
        if let Some(seed) = self.seed {
            // Derive a per-source seed from the name so feeds don't move in
            // lockstep.
            let derived = name
                .bytes()
                .fold(seed, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
            source = source.with_seed(derived);
        }
        Ok(Arc::new(source))
    }
}

impl SourceFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn FetchTask>, FetchError> {
        if let Some(task) = self.cache.read().get(name) {
            return Ok(Arc::clone(task));
        }

        let task = self.create_source(name)?;
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&task));
        Ok(task)
    }

    fn available(&self) -> Vec<&str> {
        vec!["reuters", "bloomberg", "exegy"]
    }
}
