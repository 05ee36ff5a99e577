//! # Cryptographic Error Types
//!
//! Structured errors for the operations in `taskproof-crypto`.

use taskproof_core::DigestError;
use thiserror::Error;

/// Errors from cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Ed25519 signature verification failed.
    #[error("Ed25519 verification failed: {0}")]
    VerificationFailed(String),

    /// Invalid Ed25519 signature length.
    #[error("invalid Ed25519 signature length: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    /// Invalid Ed25519 public key.
    #[error("invalid Ed25519 public key: {0}")]
    InvalidPublicKey(String),

    /// Signature algorithm other than Ed25519.
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Hex decoding error.
    #[error("hex decode error: {0}")]
    HexDecode(String),

    /// A Merkle tree needs at least one leaf.
    #[error("cannot build a Merkle tree with no leaves")]
    EmptyTree,

    /// Merkle input of the wrong shape.
    #[error("malformed Merkle input: {0}")]
    Digest(#[from] DigestError),
}
