//! Private key handling and public point derivation.

use rand::RngCore;
use secp256k1::{PublicKey, SecretKey};

use crate::codec::encode_hex;
use crate::config::EntropyWidth;
use crate::error::{KeyError, Result};

use super::{hash256, Address, PublicKeyHash, DEFAULT_VERSION};

/// A private key: a big-endian scalar of any byte length.
///
/// Keys produced by the vanity search are only as wide as the configured
/// entropy (8 bytes by default). Leading zero bytes are kept as given.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(Vec<u8>);

impl PrivateKey {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the key as uppercase hex, padding included.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }

    /// Validates the key as a secp256k1 scalar in `(0, n)`.
    pub fn to_secret_key(&self) -> Result<SecretKey> {
        to_secret_key(&self.0)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PrivateKey({} bytes)", self.0.len())
    }
}

/// SEC1 encoding of a public point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PublicPoint {
    /// Parity prefix and x coordinate (33 bytes).
    Compressed([u8; 33]),
    /// `0x04`, x and y coordinates (65 bytes).
    Uncompressed([u8; 65]),
}

impl PublicPoint {
    fn from_public_key(public_key: &PublicKey, compressed: bool) -> Self {
        if compressed {
            PublicPoint::Compressed(public_key.serialize())
        } else {
            PublicPoint::Uncompressed(public_key.serialize_uncompressed())
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            PublicPoint::Compressed(bytes) => &bytes[..],
            PublicPoint::Uncompressed(bytes) => &bytes[..],
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, PublicPoint::Compressed(_))
    }

    pub fn to_hex(&self) -> String {
        encode_hex(self.as_bytes())
    }
}

impl std::fmt::Debug for PublicPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicPoint({})", self.to_hex())
    }
}

/// A private key together with everything derived from it.
#[derive(Debug, Clone)]
pub struct Keypair {
    private_key: PrivateKey,
    public_point: PublicPoint,
    public_key_hash: PublicKeyHash,
    address: Address,
}

impl Keypair {
    /// Runs the full derivation for `private_key`.
    pub fn from_private_key(private_key: PrivateKey, compressed: bool) -> Result<Self> {
        let public_point = private_key_to_public_point(private_key.as_bytes(), compressed)?;
        let public_key_hash = public_point_to_public_key_hash(public_point.as_bytes());
        let address = Address::new(&public_key_hash, DEFAULT_VERSION);

        Ok(Self {
            private_key,
            public_point,
            public_key_hash,
            address,
        })
    }

    /// Generates a fresh key with [`generate_random_private_key`] and derives it.
    pub fn generate(compressed: bool) -> Result<Self> {
        Self::from_private_key(generate_random_private_key(), compressed)
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_point(&self) -> &PublicPoint {
        &self.public_point
    }

    pub fn public_key_hash(&self) -> &PublicKeyHash {
        &self.public_key_hash
    }

    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// Converts big-endian scalar bytes into a secp256k1 secret key.
///
/// Leading zero bytes are ignored; what remains must fit in 32 bytes and lie
/// strictly between zero and the curve order.
fn to_secret_key(bytes: &[u8]) -> Result<SecretKey> {
    let significant = &bytes[bytes.iter().take_while(|&&b| b == 0).count()..];
    if significant.is_empty() {
        return Err(KeyError::Zero.into());
    }
    if significant.len() > 32 {
        return Err(KeyError::TooLong(significant.len()).into());
    }

    let mut scalar = [0u8; 32];
    scalar[32 - significant.len()..].copy_from_slice(significant);
    SecretKey::from_slice(&scalar).map_err(|_| KeyError::OutOfRange.into())
}

/// Multiplies the generator by `private_key`.
///
/// Returns the 33-byte compressed or 65-byte uncompressed encoding.
pub fn private_key_to_public_point(private_key: &[u8], compressed: bool) -> Result<PublicPoint> {
    let secret_key = to_secret_key(private_key)?;
    let public_key = PublicKey::from_secret_key_global(&secret_key);
    Ok(PublicPoint::from_public_key(&public_key, compressed))
}

/// HASH160 of an encoded public point.
#[inline]
pub fn public_point_to_public_key_hash(public_point: &[u8]) -> PublicKeyHash {
    PublicKeyHash::from_public_point(public_point)
}

pub fn private_key_to_public_key_hash(private_key: &[u8], compressed: bool) -> Result<PublicKeyHash> {
    let point = private_key_to_public_point(private_key, compressed)?;
    Ok(public_point_to_public_key_hash(point.as_bytes()))
}

pub fn private_key_to_address(private_key: &[u8], compressed: bool) -> Result<Address> {
    let hash = private_key_to_public_key_hash(private_key, compressed)?;
    Ok(Address::new(&hash, DEFAULT_VERSION))
}

/// Generates a private key as the SHA-256 of 8 random bytes.
pub fn generate_random_private_key() -> PrivateKey {
    generate_private_key(EntropyWidth::default())
}

/// Generates a private key as the SHA-256 of `entropy` random bytes.
pub fn generate_private_key(entropy: EntropyWidth) -> PrivateKey {
    let mut seed = [0u8; EntropyWidth::MAX];
    let seed = &mut seed[..entropy.bytes()];
    rand::thread_rng().fill_bytes(seed);
    PrivateKey(hash256(seed).to_vec())
}
