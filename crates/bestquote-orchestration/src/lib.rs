//! # bestquote-orchestration
//!
//! Concurrent dispatch, best-of reduction, source selection, and the
//! chained fetch-store-email pipeline.

pub mod aggregator;
pub mod interfaces;
pub mod pipeline;
pub mod selection;

pub use aggregator::{collect_outcomes, run_fetch, run_sequential, select_best, Mode, RunOptions};
pub use interfaces::{FetchOutcome, ResultPresenter};
pub use pipeline::run_pipeline;
pub use selection::get_tasks_to_run;
