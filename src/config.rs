//! Runtime configuration and command-line surface.

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};

use crate::codec;
use crate::crypto::DEFAULT_VERSION;

/// Bitcoin key derivation toolkit and vanity address search
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of vanity search worker threads (default: number of CPU cores)
    #[arg(short = 'w', long, global = true)]
    pub workers: Option<usize>,

    /// Give up a vanity search after this many candidate keys (default: never)
    #[arg(long, global = true)]
    pub max_attempts: Option<u64>,

    /// Give up a vanity search after this many seconds (default: never)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Random bytes drawn per candidate private key (1-32)
    #[arg(long, global = true, default_value = "8")]
    pub entropy_bytes: usize,

    /// Vanity search progress report interval in seconds
    #[arg(short = 'r', long, global = true, default_value = "5")]
    pub report_interval: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Every operation reachable from the command line.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compute the first 4 bytes of SHA-256 applied twice to a hex value
    #[command(name = "checksum", visible_alias = "c")]
    Checksum {
        /// Hexadecimal value
        value: String,
    },

    /// Compute the public point a hex private key represents
    #[command(name = "privateKeyToPublicPoint", visible_alias = "kp")]
    PrivateKeyToPublicPoint {
        /// Hexadecimal private key
        private_key: String,
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Hash a hex public point into its 20-byte public key hash
    #[command(name = "publicPointToPublicKey", visible_alias = "pK")]
    PublicPointToPublicKey {
        /// Hexadecimal public point
        public_point: String,
    },

    /// Build the checksummed address of a 20-byte hex public key hash
    #[command(name = "publicKeyToAddress", visible_alias = "Ka")]
    PublicKeyToAddress {
        /// Hexadecimal public key hash (20 bytes)
        public_key: String,
        /// Address version byte
        #[arg(long, default_value_t = DEFAULT_VERSION)]
        address_version: u8,
    },

    /// Hash a hex public point and build its address
    #[command(name = "publicPointToAddress", visible_alias = "pa")]
    PublicPointToAddress {
        /// Hexadecimal public point
        public_point: String,
    },

    /// Derive the public key hash of a hex private key
    #[command(name = "privateKeyToPublicKey", visible_alias = "kK")]
    PrivateKeyToPublicKey {
        /// Hexadecimal private key
        private_key: String,
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Derive the address of a hex private key
    #[command(name = "privateKeyToAddress", visible_alias = "ka")]
    PrivateKeyToAddress {
        /// Hexadecimal private key
        private_key: String,
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Generate a random private key and its address
    #[command(name = "generateRandom", visible_alias = "gR")]
    GenerateRandom {
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Use a hex hash value directly as the private key
    #[command(name = "generateFromHash", visible_alias = "gH")]
    GenerateFromHash {
        /// Hexadecimal hash value, typically 256-bit
        hash: String,
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Use the SHA-256 of a string as the private key
    ///
    /// `\s`, `\n`, `\t` and `\\` in the string expand to a space, newline,
    /// tab and backslash.
    #[command(name = "generateFromStringSHA256", visible_alias = "gS")]
    GenerateFromStringSha256 {
        /// String to hash
        text: String,
        /// Charset the string is encoded with, e.g. US-ASCII or UTF-8
        charset: String,
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Search for a private key whose address starts with a base-58 prefix
    #[command(name = "findVanityAddress", visible_alias = "v")]
    FindVanityAddress {
        /// Base-58 prefix, must start with '1'
        prefix: String,
        /// Compressed point? (true/false/1/0)
        #[arg(value_parser = parse_bool, action = ArgAction::Set)]
        compressed: bool,
    },

    /// Convert a hexadecimal value to base-58
    #[command(name = "encodeBase58", visible_alias = "eB")]
    EncodeBase58 {
        /// Hexadecimal value
        value: String,
    },

    /// Convert a base-58 value to hexadecimal
    #[command(name = "encodeHex", visible_alias = "eH")]
    EncodeHex {
        /// Base-58 value
        value: String,
    },

    /// Run the built-in known-answer checks
    #[command(name = "performTests", visible_alias = "t")]
    PerformTests,

    /// Toggle interactive mode, reading further commands from stdin
    #[command(name = "interactiveMode", visible_alias = "i")]
    InteractiveMode,
}

fn parse_bool(text: &str) -> Result<bool, crate::Error> {
    codec::parse_bool(text)
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validates the global options into a search configuration
    pub fn search_config(&self) -> Result<SearchConfig, ConfigError> {
        let config = SearchConfig {
            workers: self.worker_count(),
            max_attempts: self.max_attempts,
            timeout: self.timeout.map(Duration::from_secs),
            entropy: EntropyWidth::new(self.entropy_bytes)?,
            report_interval: Duration::from_secs(self.report_interval),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Number of random bytes drawn for each candidate private key.
///
/// Eight bytes bound the vanity search to 2^64 distinct keys; that is the
/// default for both the search and random key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyWidth(usize);

impl EntropyWidth {
    pub const DEFAULT: usize = 8;
    pub const MAX: usize = 32;

    pub fn new(bytes: usize) -> Result<Self, ConfigError> {
        if bytes == 0 || bytes > Self::MAX {
            return Err(ConfigError::InvalidEntropy(bytes));
        }
        Ok(Self(bytes))
    }

    #[inline]
    pub fn bytes(self) -> usize {
        self.0
    }
}

impl Default for EntropyWidth {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Tuning and bounds for a vanity search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Worker thread count
    pub workers: usize,
    /// Candidate budget shared by all workers (`None` = unbounded)
    pub max_attempts: Option<u64>,
    /// Wall-clock budget (`None` = unbounded)
    pub timeout: Option<Duration>,
    /// Random bytes per candidate key
    pub entropy: EntropyWidth,
    /// How often progress is logged
    pub report_interval: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            max_attempts: None,
            timeout: None,
            entropy: EntropyWidth::default(),
            report_interval: Duration::from_secs(5),
        }
    }
}

impl SearchConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if self.report_interval.is_zero() {
            return Err(ConfigError::InvalidReportInterval);
        }
        Ok(())
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_entropy(mut self, entropy: EntropyWidth) -> Self {
        self.entropy = entropy;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Worker count must be at least 1")]
    InvalidWorkers,
    #[error("Entropy must be between 1 and 32 bytes, got {0}")]
    InvalidEntropy(usize),
    #[error("Report interval must be at least 1 second")]
    InvalidReportInterval,
}
