//! # Hash Digests: Fixed-Size Commitment Values
//!
//! Defines `HashDigest`, the 32-byte value used for Merkle leaves, siblings
//! and roots.
//!
//! ## Security Invariant
//!
//! A `HashDigest` can only be built from exactly [`DIGEST_LEN`] bytes.
//! Artifacts carry digests as hex text; `HashDigest::from_hex()` rejects
//! anything that is not exactly 64 hex characters with a `DigestError`, so a
//! truncated or padded hash surfaces as malformed input instead of as a
//! failed (or, worse, passed) Merkle check.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DigestError;

/// Size in bytes of every digest in the system (SHA-256 output size).
pub const DIGEST_LEN: usize = 32;

/// A 32-byte hash digest.
///
/// Serializes as a lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashDigest([u8; DIGEST_LEN]);

impl HashDigest {
    /// Wrap raw digest bytes.
    pub fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a digest from a byte slice of exactly [`DIGEST_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DigestError> {
        let arr: [u8; DIGEST_LEN] = bytes.try_into().map_err(|_| DigestError::InvalidLength {
            expected: DIGEST_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse a digest from 64 hex characters (either case).
    ///
    /// Odd-length or non-hex input is `InvalidHex`; well-formed hex of the
    /// wrong size is `InvalidLength`.
    pub fn from_hex(text: &str) -> Result<Self, DigestError> {
        let bytes = hex::decode(text).map_err(|e| DigestError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Return the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First four bytes as hex, for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl AsRef<[u8]> for HashDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for HashDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HashDigest({}...)", self.short_hex())
    }
}

impl std::fmt::Display for HashDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for HashDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
