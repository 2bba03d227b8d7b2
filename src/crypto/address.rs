//! Bitcoin P2PKH address representation.

use std::fmt;

use crate::codec::{encode_base58, encode_hex};
use crate::error::{Error, Result};

use super::{checksum, hash160};

/// Version byte of mainnet pay-to-public-key-hash addresses.
pub const DEFAULT_VERSION: u8 = 0x00;

/// HASH160 of a public point (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKeyHash([u8; 20]);

impl PublicKeyHash {
    /// Hashes the encoded public point.
    #[inline]
    pub fn from_public_point(point: &[u8]) -> Self {
        Self(hash160(point))
    }

    /// Wraps raw bytes, which must be exactly 20 long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let hash: [u8; 20] = bytes.try_into().map_err(|_| Error::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        })?;
        Ok(Self(hash))
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl fmt::Debug for PublicKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyHash({})", self.to_hex())
    }
}

/// A versioned, checksummed address (25 bytes before encoding).
///
/// Layout: `[version:1][public key hash:20][checksum:4]`, where the checksum
/// covers the first 21 bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 25]);

impl Address {
    /// Builds the address for `hash` under the given version byte.
    pub fn new(hash: &PublicKeyHash, version: u8) -> Self {
        let mut bytes = [0u8; 25];
        bytes[0] = version;
        bytes[1..21].copy_from_slice(hash.as_bytes());
        let check = checksum(&bytes[..21]);
        bytes[21..].copy_from_slice(&check);
        Self(bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 25] {
        &self.0
    }

    pub fn version(&self) -> u8 {
        self.0[0]
    }

    pub fn public_key_hash(&self) -> PublicKeyHash {
        let mut hash = [0u8; 20];
        hash.copy_from_slice(&self.0[1..21]);
        PublicKeyHash(hash)
    }

    /// Returns the base-58 rendering, the form addresses are shared in.
    #[inline]
    pub fn to_base58(&self) -> String {
        encode_base58(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_base58())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

/// Builds an address from a raw public key hash.
///
/// Fails unless `hash` is exactly 20 bytes.
pub fn public_key_hash_to_address(hash: &[u8], version: u8) -> Result<Address> {
    let hash = PublicKeyHash::from_slice(hash)?;
    Ok(Address::new(&hash, version))
}

/// Hashes an encoded public point and builds its default-version address.
pub fn public_point_to_address(point: &[u8]) -> Address {
    Address::new(&PublicKeyHash::from_public_point(point), DEFAULT_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash_address() {
        let addr = public_key_hash_to_address(&[0u8; 20], DEFAULT_VERSION).unwrap();
        assert_eq!(addr.to_base58(), "1111111111111111111114oLvT2");
        assert_eq!(addr.to_string(), "1111111111111111111114oLvT2");
    }

    #[test]
    fn test_wrong_hash_lengths() {
        for len in [0, 19, 21, 32] {
            match public_key_hash_to_address(&vec![0u8; len], DEFAULT_VERSION) {
                Err(Error::InvalidLength { expected, actual }) => {
                    assert_eq!(expected, 20);
                    assert_eq!(actual, len);
                }
                other => panic!("expected InvalidLength for {} bytes, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_layout() {
        let hash = PublicKeyHash::from_slice(&[0xab; 20]).unwrap();
        let addr = Address::new(&hash, 0x6f);
        assert_eq!(addr.version(), 0x6f);
        assert_eq!(addr.public_key_hash(), hash);
        assert_eq!(&addr.as_bytes()[21..], &checksum(&addr.as_bytes()[..21]));
    }

    #[test]
    fn test_deterministic() {
        let point = [0x02; 33];
        assert_eq!(public_point_to_address(&point), public_point_to_address(&point));
    }

    #[test]
    fn test_default_version_renders_leading_one() {
        let addr = public_key_hash_to_address(&[0xff; 20], DEFAULT_VERSION).unwrap();
        assert!(addr.to_base58().starts_with('1'));
        assert!(!addr.to_base58().starts_with("11"));
    }
}
