//! # bestquote-core
//!
//! Domain types and task abstraction for concurrent best-of quote fetching:
//! the `Quote` value, the `FetchTask` trait, cooperative cancellation, the
//! worker-pool seam, and the built-in simulated sources.

pub mod cancel;
pub mod pool;
pub mod quote;
pub mod registry;
pub mod source;
pub mod task;

// Re-exports
pub use cancel::CancellationToken;
pub use pool::WorkerPool;
pub use quote::{price_ascending, price_descending, Email, Quote, StoreRecord};
pub use registry::{DefaultFactory, SourceFactory};
pub use source::SimulatedSource;
pub use task::{FetchError, FetchTask, FnFetchTask};
