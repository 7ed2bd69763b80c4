//! Core aggregation: concurrent dispatch and best-of reduction.
//!
//! A single-shot scatter/gather: every task in the batch is scheduled on the
//! caller's worker pool, outcomes fan in over a channel, and the join point
//! either waits for every outcome (`WaitAll`) or for the first success
//! (`RaceFirst`). Reduction is a pure min-by over the successful quotes, so
//! the `WaitAll` result never depends on completion order.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use bestquote_core::cancel::CancellationToken;
use bestquote_core::pool::WorkerPool;
use bestquote_core::quote::Quote;
use bestquote_core::task::{FetchError, FetchTask};

use crate::interfaces::FetchOutcome;

/// Aggregation policy at the join point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Wait for every task to produce an outcome, then reduce.
    WaitAll,
    /// Return the first successful quote; abandon the rest.
    RaceFirst,
}

/// Per-run options. `fail_fast` must be an explicit caller choice, never an
/// implicit default.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Abort the whole batch on the first task failure (`WaitAll` only).
    pub fail_fast: bool,
    /// Deadline for the join point.
    pub timeout: Option<std::time::Duration>,
}

/// Run the fetch tasks concurrently and reduce to the best quote under the
/// caller-supplied ordering.
///
/// The task set is fixed at the call; nothing is added, removed, or retried
/// once dispatch begins. Pool lifecycle stays with the caller.
pub fn run_fetch<F>(
    pool: &dyn WorkerPool,
    tasks: &[Arc<dyn FetchTask>],
    ordering: F,
    mode: Mode,
    opts: &RunOptions,
    cancel: &CancellationToken,
) -> Result<Quote, FetchError>
where
    F: Fn(&Quote, &Quote) -> Ordering,
{
    if tasks.is_empty() {
        return Err(FetchError::EmptyTaskSet);
    }

    match mode {
        Mode::WaitAll => {
            let outcomes = collect_outcomes(pool, tasks, opts, cancel)?;
            select_best(&outcomes, ordering)
        }
        Mode::RaceFirst => race_first(pool, tasks, opts, cancel),
    }
}

/// Dispatch every task on the pool and collect one outcome per task.
///
/// With `fail_fast` set, the first observed failure aborts the batch with
/// that task's error and cancels the shared token so cooperative losers can
/// stop early.
pub fn collect_outcomes(
    pool: &dyn WorkerPool,
    tasks: &[Arc<dyn FetchTask>],
    opts: &RunOptions,
    cancel: &CancellationToken,
) -> Result<Vec<FetchOutcome>, FetchError> {
    if tasks.is_empty() {
        return Err(FetchError::EmptyTaskSet);
    }

    let (tx, rx) = bounded(tasks.len());
    dispatch(pool, tasks, cancel, &tx);
    drop(tx);

    let deadline = opts.timeout.map(|t| Instant::now() + t);
    let mut outcomes = Vec::with_capacity(tasks.len());
    for _ in 0..tasks.len() {
        let outcome = recv_outcome(&rx, deadline)?;
        debug!(
            source = %outcome.source,
            ok = outcome.outcome.is_ok(),
            elapsed = ?outcome.duration,
            "fetch outcome"
        );
        if opts.fail_fast {
            if let Err(err) = &outcome.outcome {
                cancel.cancel();
                return Err(err.clone());
            }
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Reduce collected outcomes to the minimal successful quote under `ordering`.
///
/// Pure and order-independent: the result depends only on the set of
/// successful quotes, never on completion order. Failed outcomes are
/// excluded from the reduction.
pub fn select_best<F>(outcomes: &[FetchOutcome], ordering: F) -> Result<Quote, FetchError>
where
    F: Fn(&Quote, &Quote) -> Ordering,
{
    if outcomes.is_empty() {
        return Err(FetchError::EmptyTaskSet);
    }

    let best = outcomes
        .iter()
        .filter_map(|o| o.outcome.as_ref().ok())
        .min_by(|a, b| ordering(a, b));

    match best {
        Some(quote) => Ok(quote.clone()),
        None => Err(FetchError::AllFailed(outcomes.len())),
    }
}

/// Run the tasks one after another on the caller's thread and reduce.
///
/// Baseline for comparing against the concurrent modes. Fail-fast by
/// construction: the first failing task aborts the batch.
pub fn run_sequential<F>(
    tasks: &[Arc<dyn FetchTask>],
    ordering: F,
    cancel: &CancellationToken,
) -> Result<Quote, FetchError>
where
    F: Fn(&Quote, &Quote) -> Ordering,
{
    if tasks.is_empty() {
        return Err(FetchError::EmptyTaskSet);
    }

    let mut quotes = Vec::with_capacity(tasks.len());
    for task in tasks {
        cancel.check_cancelled()?;
        quotes.push(task.fetch(cancel)?);
    }
    quotes
        .into_iter()
        .min_by(|a, b| ordering(a, b))
        .ok_or(FetchError::AllFailed(tasks.len()))
}

fn race_first(
    pool: &dyn WorkerPool,
    tasks: &[Arc<dyn FetchTask>],
    opts: &RunOptions,
    cancel: &CancellationToken,
) -> Result<Quote, FetchError> {
    let (tx, rx) = bounded(tasks.len());
    dispatch(pool, tasks, cancel, &tx);
    drop(tx);

    let deadline = opts.timeout.map(|t| Instant::now() + t);
    let mut failures = 0;
    while failures < tasks.len() {
        let outcome = recv_outcome(&rx, deadline)?;
        match outcome.outcome {
            Ok(quote) => {
                // Losers are abandoned. Cancelling the token lets
                // cooperative tasks stop early; tasks that ignore it run to
                // completion and their sends land in a dropped channel.
                cancel.cancel();
                debug!(source = %outcome.source, elapsed = ?outcome.duration, "race winner");
                return Ok(quote);
            }
            Err(err) => {
                warn!(source = %outcome.source, error = %err, "race entrant failed");
                failures += 1;
            }
        }
    }
    Err(FetchError::AllFailed(tasks.len()))
}

fn dispatch(
    pool: &dyn WorkerPool,
    tasks: &[Arc<dyn FetchTask>],
    cancel: &CancellationToken,
    tx: &Sender<FetchOutcome>,
) {
    for task in tasks {
        let task = Arc::clone(task);
        let cancel = cancel.clone();
        let tx = tx.clone();
        pool.spawn_job(Box::new(move || {
            let start = Instant::now();
            let outcome = task.fetch(&cancel);
            // The receiver may be gone if the run was abandoned.
            let _ = tx.send(FetchOutcome {
                source: task.name().to_string(),
                outcome,
                duration: start.elapsed(),
            });
        }));
    }
}

fn recv_outcome(
    rx: &Receiver<FetchOutcome>,
    deadline: Option<Instant>,
) -> Result<FetchOutcome, FetchError> {
    let received = match deadline {
        Some(deadline) => rx.recv_deadline(deadline),
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };
    match received {
        Ok(outcome) => Ok(outcome),
        Err(RecvTimeoutError::Timeout) => {
            Err(FetchError::Timeout("join deadline reached".into()))
        }
        // Only reachable if a worker died without reporting.
        Err(RecvTimeoutError::Disconnected) => Err(FetchError::Task {
            source: "<pool>".into(),
            cause: "worker exited without reporting an outcome".into(),
        }),
    }
}
