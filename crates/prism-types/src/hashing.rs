//! # Hashing
//!
//! Keccak-256 helpers for selector and identifier derivation.
//! Pure functions, no I/O, deterministic across all callers.

use crate::value_objects::{Hash, Selector};
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 digest of arbitrary data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Hash::new(bytes)
}

/// Derives the 4-byte selector for an operation signature.
///
/// selector = keccak256(signature)\[..4\]
///
/// Two distinct signatures hashing to the same selector would collide in
/// the routing table; the cut protocol rejects the duplicate at
/// registration time.
#[must_use]
pub fn selector(signature: &str) -> Selector {
    let digest = keccak256(signature.as_bytes());
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&digest.as_bytes()[..4]);
    Selector::new(bytes)
}

// =============================================================================
// TESTS
// =============================================================================
