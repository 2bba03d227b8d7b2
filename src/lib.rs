//! # btc_vanity
//!
//! Bitcoin P2PKH key derivation toolkit and multi-threaded vanity address search.
//!
//! ## Architecture
//!
//! - `codec`: Padding-preserving hex and base-58 codecs
//! - `crypto`: Hash chain, public point derivation and address construction
//! - `matcher`: Vanity prefix validation and difficulty estimation
//! - `worker`: Parallel execution and worker pool management
//! - `search`: Bounded, cancellable vanity search on top of the pool
//! - `selftest`: Known-answer checks
//! - `config` / `commands`: Runtime configuration and the command surface

pub mod codec;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod search;
pub mod selftest;
pub mod worker;

pub use config::{Command, Config, EntropyWidth, SearchConfig};
pub use crypto::{Address, Keypair, PrivateKey, PublicKeyHash, PublicPoint};
pub use error::{Error, FormatError, KeyError, Result};
pub use matcher::Pattern;
pub use search::{find_vanity_address, CancelHandle, VanitySearch};
pub use worker::{VanityResult, WorkerPool};
