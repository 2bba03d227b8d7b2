//! CPU-based worker for vanity address generation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use rand::RngCore;
use tracing::{debug, trace};

use crate::config::EntropyWidth;
use crate::crypto::{Keypair, PrivateKey};
use crate::matcher::Pattern;

use super::VanityResult;

/// Statistics shared by all workers of a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Candidate keys derived and tested
    pub keys_generated: AtomicU64,
    /// Candidate keys claimed against the attempt budget
    pub keys_reserved: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total keys generated.
    pub fn total_keys(&self) -> u64 {
        self.keys_generated.load(Ordering::Relaxed)
    }
}

/// What every worker in a pool searches for.
#[derive(Debug, Clone)]
pub struct SearchJob {
    /// The prefix to match against
    pub pattern: Pattern,
    /// Derive compressed public points
    pub compressed: bool,
    /// Random bytes per candidate key
    pub entropy: EntropyWidth,
    /// Candidate budget shared by all workers
    pub max_attempts: Option<u64>,
}

/// A CPU worker that draws candidate keys and tests their addresses.
pub struct CpuWorker {
    /// Worker ID
    id: usize,
    /// The search parameters
    job: SearchJob,
    /// Channel to send the winning result
    result_tx: Sender<VanityResult>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
}

impl CpuWorker {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        job: SearchJob,
        result_tx: Sender<VanityResult>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
    ) -> Self {
        Self {
            id,
            job,
            result_tx,
            stop_flag,
            stats,
        }
    }

    /// Runs the worker loop.
    ///
    /// Draws random candidate keys and tests them against the pattern until:
    /// - A match is found (the first worker to raise the stop flag sends it)
    /// - Stop flag is set
    /// - The shared attempt budget is used up
    pub fn run(&self) {
        // Process in batches to reduce atomic operation overhead
        const BATCH_SIZE: u64 = 256;

        debug!(worker = self.id, "worker started");

        let mut rng = rand::thread_rng();
        let mut candidate = vec![0u8; self.job.entropy.bytes()];

        'search: loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            let batch = self.reserve(BATCH_SIZE);
            if batch == 0 {
                debug!(worker = self.id, "attempt budget used up");
                break;
            }

            for tried in 1..=batch {
                rng.fill_bytes(&mut candidate);

                let keypair = match Keypair::from_private_key(
                    PrivateKey::from_bytes(&candidate[..]),
                    self.job.compressed,
                ) {
                    Ok(keypair) => keypair,
                    Err(e) => {
                        trace!(worker = self.id, error = %e, "skipping candidate");
                        continue;
                    }
                };

                let address = keypair.address().to_base58();
                if self.job.pattern.matches(&address) {
                    self.stats.keys_generated.fetch_add(tried, Ordering::Relaxed);
                    self.claim(keypair);
                    break 'search;
                }
            }

            // Update stats
            self.stats.keys_generated.fetch_add(batch, Ordering::Relaxed);
        }

        debug!(worker = self.id, "worker stopped");
    }

    /// Claims up to `size` attempts from the shared budget.
    fn reserve(&self, size: u64) -> u64 {
        match self.job.max_attempts {
            None => size,
            Some(max) => {
                let start = self.stats.keys_reserved.fetch_add(size, Ordering::Relaxed);
                max.saturating_sub(start).min(size)
            }
        }
    }

    /// Publishes a match unless another worker (or the caller) stopped first.
    fn claim(&self, keypair: Keypair) {
        if self.stop_flag.swap(true, Ordering::AcqRel) {
            debug!(worker = self.id, "match found after search was stopped");
            return;
        }

        let result = VanityResult {
            private_key: keypair.private_key().clone(),
            address: *keypair.address(),
            worker_id: self.id,
            attempts: self.stats.total_keys(),
        };

        // Try to send result (ignore if channel closed)
        let _ = self.result_tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn job(prefix: &str, max_attempts: Option<u64>) -> SearchJob {
        SearchJob {
            pattern: Pattern::new(prefix).unwrap(),
            compressed: true,
            entropy: EntropyWidth::default(),
            max_attempts,
        }
    }

    #[test]
    fn test_trivial_prefix_matches_first_candidate() {
        let (tx, rx) = bounded(1);
        let stop = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let worker = CpuWorker::new(7, job("1", None), tx, stop.clone(), stats.clone());
        worker.run();

        let result = rx.try_recv().unwrap();
        assert_eq!(result.worker_id, 7);
        assert_eq!(result.private_key.as_bytes().len(), 8);
        assert!(stop.load(Ordering::Relaxed));
        assert_eq!(stats.total_keys(), 1);
    }

    #[test]
    fn test_budget_stops_worker() {
        let (tx, rx) = bounded(1);
        let stop = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let worker = CpuWorker::new(0, job("1zzzzzzzzz", Some(300)), tx, stop.clone(), stats.clone());
        worker.run();

        assert!(rx.try_recv().is_err());
        assert!(!stop.load(Ordering::Relaxed));
        assert_eq!(stats.total_keys(), 300);
    }

    #[test]
    fn test_stopped_worker_does_nothing() {
        let (tx, rx) = bounded(1);
        let stop = Arc::new(AtomicBool::new(true));
        let stats = Arc::new(WorkerStats::new());

        CpuWorker::new(0, job("1", None), tx, stop, stats.clone()).run();

        assert!(rx.try_recv().is_err());
        assert_eq!(stats.total_keys(), 0);
    }
}
