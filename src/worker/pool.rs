//! Worker pool management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use crate::crypto::{Address, PrivateKey};
use crate::error::{Error, Result};

use super::cpu::{CpuWorker, SearchJob, WorkerStats};

/// Result of a successful vanity address search.
#[derive(Debug, Clone)]
pub struct VanityResult {
    /// The winning private key, as wide as the configured entropy
    pub private_key: PrivateKey,
    /// The matching address
    pub address: Address,
    /// The ID of the worker that found this result
    pub worker_id: usize,
    /// Keys tried across all workers
    pub attempts: u64,
}

/// Manages a pool of workers for parallel vanity address generation.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for results
    result_rx: Receiver<VanityResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
    /// Start time
    start_time: Instant,
}

impl WorkerPool {
    /// Spawns `num_workers` workers for `job`.
    ///
    /// Fails with [`Error::NoWorkers`] if no worker thread could be started.
    pub fn new(num_workers: usize, job: SearchJob) -> Result<Self> {
        // Only one worker ever sends, the one that raised the stop flag.
        let (result_tx, result_rx) = bounded(1);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let handles = Self::spawn_workers(
            num_workers,
            job,
            result_tx,
            stop_flag.clone(),
            stats.clone(),
        );

        if handles.is_empty() {
            return Err(Error::NoWorkers);
        }

        Ok(Self {
            num_workers: handles.len(),
            handles: Some(handles),
            result_rx,
            stop_flag,
            stats,
            start_time: Instant::now(),
        })
    }

    /// Spawns worker threads.
    ///
    /// A worker whose thread cannot be spawned is skipped; the pool runs with
    /// the remaining ones.
    fn spawn_workers(
        num_workers: usize,
        job: SearchJob,
        result_tx: Sender<VanityResult>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Vec<JoinHandle<()>> {
        (0..num_workers)
            .filter_map(|id| {
                let job = job.clone();
                let result_tx = result_tx.clone();
                let stop_flag = stop_flag.clone();
                let stats = stats.clone();

                thread::Builder::new()
                    .name(format!("vanity-worker-{}", id))
                    .spawn(move || {
                        let worker = CpuWorker::new(id, job, result_tx, stop_flag, stats);
                        worker.run();
                    })
                    .map_err(|e| warn!(worker = id, error = %e, "failed to spawn worker thread"))
                    .ok()
            })
            .collect()
    }

    /// Waits for a result with a timeout.
    ///
    /// `Err(Disconnected)` means every worker has exited without a match,
    /// which only happens once the attempt budget is used up.
    pub fn wait_for_result(
        &self,
        timeout: Duration,
    ) -> std::result::Result<VanityResult, RecvTimeoutError> {
        self.result_rx.recv_timeout(timeout)
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops and waits for all workers to complete.
    pub fn join(mut self) {
        self.join_workers();
    }

    fn join_workers(&mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
            debug!(workers = self.num_workers, "worker pool joined");
        }
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the total keys generated across all workers.
    pub fn total_keys(&self) -> u64 {
        self.stats.total_keys()
    }

    /// Returns the elapsed time since the pool was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the current generation rate (keys per second).
    pub fn keys_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_keys() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns true if the pool has been signaled to stop.
    pub fn is_stopped(&self) -> bool {
        self.stop_flag.load(Ordering::Relaxed)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Wait for workers to finish if they haven't been joined
        self.join_workers();
    }
}
