//! Worker pool for parallel vanity address generation.
//!
//! This module provides:
//! - Multi-threaded CPU workers
//! - A shared stop flag raised by the first worker to find a match
//! - A shared attempt budget and progress statistics

mod cpu;
mod pool;

pub use cpu::{CpuWorker, SearchJob, WorkerStats};
pub use pool::{VanityResult, WorkerPool};
