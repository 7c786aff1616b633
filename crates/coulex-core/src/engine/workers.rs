use super::error::EngineError;
use tracing::debug;

/// A fixed-size pool of `T` workers shared by both computation phases.
///
/// With the `parallel` feature the pool owns a dedicated rayon thread pool, so the
/// degree of parallelism is exactly `T` regardless of the global rayon configuration.
/// Without it, [`install`](Self::install) simply runs the operation on the calling
/// thread and the workers execute one after another.
pub struct WorkerPool {
    workers: usize,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// # Errors
    ///
    /// Returns [`EngineError::Internal`] for a zero worker count and
    /// [`EngineError::ThreadPool`] if the operating system refuses to spawn the threads.
    pub fn new(workers: usize) -> Result<Self, EngineError> {
        if workers == 0 {
            return Err(EngineError::Internal(
                "worker pool requires at least one worker".to_string(),
            ));
        }

        #[cfg(feature = "parallel")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("coulex-worker-{index}"))
            .build()
            .map_err(|e| EngineError::ThreadPool(e.to_string()))?;

        debug!(workers, "Worker pool ready.");
        Ok(Self {
            workers,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `op` inside the pool; parallel iterators started by `op` use its threads.
    #[cfg(feature = "parallel")]
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    #[cfg(not(feature = "parallel"))]
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        op()
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}
