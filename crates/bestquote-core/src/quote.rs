//! Quote and pipeline value types.

use std::cmp::Ordering;
use std::fmt;

/// A single market-data quote produced by one source.
///
/// Immutable once created; the aggregator never mutates a quote after
/// collection, it only clones the winning one out.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Name of the source that produced this quote.
    pub source: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Quoted price, the orderable key for reduction.
    pub price: f64,
}

impl Quote {
    /// Create a new quote.
    #[must_use]
    pub fn new(source: impl Into<String>, symbol: impl Into<String>, price: f64) -> Self {
        Self {
            source: source.into(),
            symbol: symbol.into(),
            price,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.2} from {}", self.symbol, self.price, self.source)
    }
}

/// Total order over quotes by ascending price.
///
/// NaN prices sort last so a poisoned quote never wins the reduction.
#[must_use]
pub fn price_ascending(a: &Quote, b: &Quote) -> Ordering {
    match a.price.partial_cmp(&b.price) {
        Some(ord) => ord,
        None => match (a.price.is_nan(), b.price.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

/// Total order over quotes by descending price.
#[must_use]
pub fn price_descending(a: &Quote, b: &Quote) -> Ordering {
    price_ascending(b, a)
}

/// Record of a quote written to a store. Inert carrier for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRecord {
    /// Store name.
    pub store: String,
    /// Table the quote was written to.
    pub table: String,
}

impl fmt::Display for StoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.store, self.table)
    }
}

/// Summary email produced at the end of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "to {}: {}", self.recipient, self.subject)
    }
}
