//! Chained fetch -> store -> email pipeline.
//!
//! Three sequential transformations, each submitted to the worker pool with
//! a blocking join before the next stage starts. The store and email stages
//! are simulations over inert value carriers.

use std::sync::Arc;

use crossbeam_channel::bounded;
use tracing::info;

use bestquote_core::cancel::CancellationToken;
use bestquote_core::pool::WorkerPool;
use bestquote_core::quote::{Email, Quote, StoreRecord};
use bestquote_core::task::{FetchError, FetchTask};

/// Fetch a quote, store it, then produce a summary email of the stored
/// record. Cancellation is observed between stages.
pub fn run_pipeline(
    pool: &dyn WorkerPool,
    task: &Arc<dyn FetchTask>,
    cancel: &CancellationToken,
) -> Result<Email, FetchError> {
    let quote = {
        let task = Arc::clone(task);
        let cancel = cancel.clone();
        run_stage(pool, move || task.fetch(&cancel))?
    };
    info!(%quote, "pipeline fetched");

    cancel.check_cancelled()?;
    let record = {
        let quote = quote.clone();
        run_stage(pool, move || Ok(store_quote(&quote)))?
    };
    info!(%record, "pipeline stored");

    cancel.check_cancelled()?;
    let email = run_stage(pool, move || Ok(summarize(&quote, &record)))?;
    Ok(email)
}

fn store_quote(quote: &Quote) -> StoreRecord {
    StoreRecord {
        store: "oracle".into(),
        table: format!("quotes_{}", quote.symbol.to_lowercase()),
    }
}

fn summarize(quote: &Quote, record: &StoreRecord) -> Email {
    Email {
        recipient: "desk@bestquote.example".into(),
        sender: "pipeline@bestquote.example".into(),
        subject: format!("{} stored in {record}", quote.symbol),
        body: format!("Stored {quote} in {record}."),
    }
}

/// Run one stage on the pool and block until it reports back.
fn run_stage<T, F>(pool: &dyn WorkerPool, job: F) -> Result<T, FetchError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, FetchError> + Send + 'static,
{
    let (tx, rx) = bounded(1);
    pool.spawn_job(Box::new(move || {
        let _ = tx.send(job());
    }));
    rx.recv().map_err(|_| FetchError::Task {
        source: "<pool>".into(),
        cause: "stage worker exited without reporting".into(),
    })?
}
