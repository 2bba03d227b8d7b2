//! Cryptographic operations for Bitcoin key and address derivation.
//!
//! This module provides:
//! - The hash chain used by the address scheme (SHA-256, double SHA-256, HASH160)
//! - Public point and public-key-hash derivation on secp256k1
//! - Versioned, checksummed 25-byte addresses
//!
//! Every hash call builds its own hasher, so all functions here are safe to
//! call from any number of threads at once.

mod address;
mod keypair;

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

pub use address::{
    public_key_hash_to_address, public_point_to_address, Address, PublicKeyHash, DEFAULT_VERSION,
};
pub use keypair::{
    generate_private_key, generate_random_private_key, private_key_to_address,
    private_key_to_public_key_hash, private_key_to_public_point, public_point_to_public_key_hash,
    Keypair, PrivateKey, PublicPoint,
};

/// Single SHA-256 of arbitrary bytes.
#[inline]
pub fn hash256(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// First 4 bytes of SHA-256 applied twice.
#[inline]
pub fn checksum(input: &[u8]) -> [u8; 4] {
    let digest = Sha256::digest(Sha256::digest(input));
    [digest[0], digest[1], digest[2], digest[3]]
}

/// RIPEMD-160 of SHA-256.
#[inline]
pub fn hash160(input: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(input)).into()
}
