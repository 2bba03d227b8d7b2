//! Hexadecimal codec.

use crate::error::{FormatError, Result};

/// Encodes bytes as uppercase hex, two characters per byte.
#[inline]
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decodes a hex string of either case.
///
/// Fails on odd length or any character outside `[0-9A-Fa-f]`.
pub fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(text).map_err(FormatError::from)?;
    Ok(bytes)
}
