//! Text codecs for keys, hashes and addresses.
//!
//! This module provides:
//! - Uppercase hexadecimal encoding that keeps every leading zero byte
//! - Base-58 encoding where each leading zero byte becomes a leading `'1'`
//! - Boolean and charset parsing for the command surface

mod base58;
mod hex;
mod text;

pub use self::base58::{decode_base58, encode_base58, ALPHABET};
pub use self::hex::{decode_hex, encode_hex};
pub use self::text::{parse_bool, unescape, Charset};
