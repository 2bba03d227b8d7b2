//! Pattern matching implementation.

use crate::codec::decode_base58;
use crate::error::{Error, Result};

/// Leading character of every default-version address.
const ADDRESS_LEAD: char = '1';

/// A validated vanity prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    prefix: String,
}

impl Pattern {
    /// Validates a prefix.
    ///
    /// The prefix must be valid base-58 and start with `'1'`; any other
    /// leading character can never appear on a default-version address.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();

        decode_base58(&prefix)?;
        if !prefix.starts_with(ADDRESS_LEAD) {
            return Err(Error::UnreachablePrefix(prefix));
        }

        Ok(Self { prefix })
    }

    /// Case-sensitive prefix test against a base-58 address.
    #[inline]
    pub fn matches(&self, address: &str) -> bool {
        address.as_bytes().starts_with(self.prefix.as_bytes())
    }

    /// Returns the estimated number of attempts to find a match.
    ///
    /// The first `'1'` is always present. Each further leading `'1'` needs a
    /// zero byte in the hash (1 in 256); every other character is 1 in 58.
    pub fn estimated_difficulty(&self) -> u64 {
        let ones = self.prefix.bytes().take_while(|&b| b == b'1').count() as u32;
        let rest = self.prefix.len() as u32 - ones;

        256u64
            .saturating_pow(ones - 1)
            .saturating_mul(58u64.saturating_pow(rest))
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}
