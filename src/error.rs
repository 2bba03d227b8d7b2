//! Error types shared by the codec, derivation and search layers.

use std::time::Duration;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure a core operation can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed hex, base-58 or boolean text.
    #[error("Malformed input: {0}")]
    Format(#[from] FormatError),

    /// A value handed to address construction had the wrong size.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The private key is not a usable secp256k1 scalar.
    #[error("Invalid private key: {0}")]
    InvalidKey(#[from] KeyError),

    /// The vanity prefix can never appear at the start of an address.
    #[error("Unreachable vanity prefix {0:?}: every address starts with '1'")]
    UnreachablePrefix(String),

    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Not a single worker thread could be started.
    #[error("No vanity search worker could be started")]
    NoWorkers,

    /// The configured attempt budget ran out before a match.
    #[error("Vanity search gave up after {attempts} attempts")]
    SearchExhausted { attempts: u64 },

    /// The configured time budget ran out before a match.
    #[error("Vanity search timed out after {:.2}s ({attempts} attempts)", elapsed.as_secs_f64())]
    SearchTimedOut { elapsed: Duration, attempts: u64 },

    /// The search was stopped from outside (e.g. Ctrl-C).
    #[error("Vanity search cancelled after {attempts} attempts")]
    SearchCancelled { attempts: u64 },
}

impl Error {
    /// Returns true for any malformed-text failure.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

/// The ways textual input can be malformed.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base-58 character {character:?} at position {position}")]
    Base58 { character: char, position: usize },

    #[error("unrecognized boolean {0:?} (expected true/True/TRUE/1 or false/False/FALSE/0)")]
    Boolean(String),
}

/// Why a private key was rejected as a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("scalar is zero")]
    Zero,

    #[error("scalar is {0} significant bytes, at most 32 allowed")]
    TooLong(usize),

    #[error("scalar is not below the curve order")]
    OutOfRange,
}
