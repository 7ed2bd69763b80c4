//! Worker-pool seam.
//!
//! The aggregator borrows a pool handle and schedules jobs on it; building
//! and dropping the pool stays with the caller.

/// A thing that runs jobs concurrently.
pub trait WorkerPool: Send + Sync {
    /// Schedule a job for execution on the pool.
    fn spawn_job(&self, job: Box<dyn FnOnce() + Send + 'static>);
}

impl WorkerPool for rayon::ThreadPool {
    fn spawn_job(&self, job: Box<dyn FnOnce() + Send + 'static>) {
        self.spawn(job);
    }
}
