//! Vanity address search.
//!
//! Runs a [`WorkerPool`] and watches it from the calling thread: the first
//! match wins, and the attempt budget, the timeout or an external cancel flag
//! end the search early. Without bounds the search runs until a match.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use tracing::info;

use crate::config::SearchConfig;
use crate::crypto::PrivateKey;
use crate::error::{Error, Result};
use crate::matcher::Pattern;
use crate::worker::{SearchJob, VanityResult, WorkerPool};

/// How often the coordinating thread checks cancellation and the deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A configured, validated vanity search.
#[derive(Debug, Clone)]
pub struct VanitySearch {
    pattern: Pattern,
    compressed: bool,
    config: SearchConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl VanitySearch {
    /// Validates `prefix` and prepares a search.
    ///
    /// Fails with a format error if `prefix` is not base-58, then with
    /// [`Error::UnreachablePrefix`] if it does not start with `'1'`.
    pub fn new(prefix: &str, compressed: bool, config: SearchConfig) -> Result<Self> {
        Ok(Self {
            pattern: Pattern::new(prefix)?,
            compressed,
            config,
            cancel: None,
        })
    }

    /// Stops the search early once `cancel` is set.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Runs the search on the configured number of workers.
    pub fn run(&self) -> Result<VanityResult> {
        info!(
            prefix = %self.pattern,
            compressed = self.compressed,
            workers = self.config.workers,
            difficulty = self.pattern.estimated_difficulty(),
            "starting vanity search ({})",
            self.pattern.difficulty_description()
        );

        let job = SearchJob {
            pattern: self.pattern.clone(),
            compressed: self.compressed,
            entropy: self.config.entropy,
            max_attempts: self.config.max_attempts,
        };
        let pool = WorkerPool::new(self.config.workers, job)?;

        let started = Instant::now();
        let deadline = self.config.timeout.map(|timeout| started + timeout);
        let mut next_report = started + self.config.report_interval;

        loop {
            match pool.wait_for_result(POLL_INTERVAL) {
                Ok(mut result) => {
                    result.attempts = result.attempts.max(stop(pool));
                    info!(
                        address = %result.address,
                        worker = result.worker_id,
                        attempts = result.attempts,
                        elapsed_secs = started.elapsed().as_secs_f64(),
                        "vanity address found"
                    );
                    return Ok(result);
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let attempts = pool.total_keys();
                    pool.join();
                    info!(attempts, "vanity search exhausted its attempt budget");
                    return Err(Error::SearchExhausted { attempts });
                }
                Err(RecvTimeoutError::Timeout) => {}
            }

            if self.is_cancelled() {
                let attempts = stop(pool);
                info!(attempts, "vanity search cancelled");
                return Err(Error::SearchCancelled { attempts });
            }

            let now = Instant::now();
            if deadline.is_some_and(|deadline| now >= deadline) {
                let attempts = stop(pool);
                let elapsed = started.elapsed();
                info!(attempts, elapsed_secs = elapsed.as_secs_f64(), "vanity search timed out");
                return Err(Error::SearchTimedOut { elapsed, attempts });
            }

            if now >= next_report {
                info!(
                    elapsed_secs = pool.elapsed().as_secs(),
                    keys = pool.total_keys(),
                    keys_per_second = pool.keys_per_second() as u64,
                    "searching"
                );
                next_report += self.config.report_interval;
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|cancel| cancel.load(Ordering::Relaxed))
    }
}

/// Interrupt routing between a signal handler and the searches it may stop.
///
/// An interrupt only cancels a search while one is running through
/// [`CancelHandle::run`]; otherwise it is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancel: Arc<AtomicBool>,
    searching: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the running search. Returns false if none is running.
    pub fn interrupt(&self) -> bool {
        if !self.searching.load(Ordering::SeqCst) {
            return false;
        }
        self.cancel.store(true, Ordering::SeqCst);
        true
    }

    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::SeqCst)
    }

    /// Runs `search` so that [`CancelHandle::interrupt`] can stop it.
    pub fn run(&self, search: VanitySearch) -> Result<VanityResult> {
        self.cancel.store(false, Ordering::SeqCst);
        self.searching.store(true, Ordering::SeqCst);
        let result = search.with_cancel_flag(self.cancel.clone()).run();
        self.searching.store(false, Ordering::SeqCst);
        result
    }
}

/// Stops and joins the pool, returning the keys tried.
fn stop(pool: WorkerPool) -> u64 {
    pool.stop();
    let attempts = pool.total_keys();
    pool.join();
    attempts
}

/// Searches with the default, unbounded configuration.
///
/// Returns the winning private key (8 bytes wide by default).
pub fn find_vanity_address(prefix: &str, compressed: bool) -> Result<PrivateKey> {
    let search = VanitySearch::new(prefix, compressed, SearchConfig::default())?;
    search.run().map(|result| result.private_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::private_key_to_address;

    fn small_config() -> SearchConfig {
        SearchConfig::default().with_workers(2)
    }

    #[test]
    fn test_find_short_prefix() {
        let search = VanitySearch::new("1B", true, small_config()).unwrap();
        let result = search.run().unwrap();

        assert!(result.address.to_base58().starts_with("1B"));
        assert!(result.attempts >= 1);

        let rederived = private_key_to_address(result.private_key.as_bytes(), true).unwrap();
        assert_eq!(rederived, result.address);
    }

    #[test]
    fn test_find_vanity_address_default_config() {
        let key = find_vanity_address("1A", false).unwrap();
        assert_eq!(key.as_bytes().len(), 8);
        let address = private_key_to_address(key.as_bytes(), false).unwrap();
        assert!(address.to_base58().starts_with("1A"));
    }

    #[test]
    fn test_preconditions_fail_before_searching() {
        assert!(VanitySearch::new("1O", true, small_config())
            .unwrap_err()
            .is_format_error());
        assert!(matches!(
            find_vanity_address("Bob", true),
            Err(Error::UnreachablePrefix(_))
        ));
    }

    #[test]
    fn test_attempt_bound() {
        let config = small_config().with_max_attempts(500);
        let search = VanitySearch::new("1zzzzzzzzz", true, config).unwrap();
        match search.run() {
            Err(Error::SearchExhausted { attempts }) => assert_eq!(attempts, 500),
            other => panic!("expected SearchExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_time_bound() {
        let config = small_config().with_timeout(Duration::from_millis(200));
        let search = VanitySearch::new("1zzzzzzzzz", true, config).unwrap();
        match search.run() {
            Err(Error::SearchTimedOut { elapsed, .. }) => {
                assert!(elapsed >= Duration::from_millis(200))
            }
            other => panic!("expected SearchTimedOut, got {:?}", other),
        }
    }

    #[test]
    fn test_no_workers_is_not_exhaustion() {
        let search = VanitySearch::new("1B", true, small_config().with_workers(0)).unwrap();
        assert!(matches!(search.run(), Err(Error::NoWorkers)));
    }

    #[test]
    fn test_cancel_flag() {
        let cancel = Arc::new(AtomicBool::new(true));
        let search = VanitySearch::new("1zzzzzzzzz", true, small_config())
            .unwrap()
            .with_cancel_flag(cancel);
        assert!(matches!(search.run(), Err(Error::SearchCancelled { .. })));
    }

    #[test]
    fn test_interrupt_without_search_is_not_consumed() {
        let handle = CancelHandle::new();
        assert!(!handle.interrupt());
        assert!(!handle.is_searching());

        let result = handle.run(VanitySearch::new("1B", true, small_config()).unwrap());
        assert!(result.is_ok());
    }

    #[test]
    fn test_interrupt_cancels_running_search() {
        let handle = CancelHandle::new();
        let search = VanitySearch::new("1zzzzzzzzz", true, small_config()).unwrap();

        let runner = {
            let handle = handle.clone();
            std::thread::spawn(move || handle.run(search))
        };
        while !handle.is_searching() {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(handle.interrupt());

        let outcome = runner.join().unwrap();
        assert!(matches!(outcome, Err(Error::SearchCancelled { .. })));
        assert!(!handle.is_searching());
    }

    #[test]
    fn test_wide_entropy_keys() {
        let config = small_config().with_entropy(crate::config::EntropyWidth::new(32).unwrap());
        let result = VanitySearch::new("1", true, config).unwrap().run().unwrap();
        assert_eq!(result.private_key.as_bytes().len(), 32);
    }
}
