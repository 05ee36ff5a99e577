//! # Error Types: Foundational Errors
//!
//! Errors raised by the primitives in this crate. Higher layers wrap them
//! (`CryptoError` in `taskproof-crypto`, `MalformedArtifact` in
//! `taskproof-verify`) so that the field or operation that failed travels
//! with the cause.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// A number has no finite IEEE-754 double form.
    #[error("number {0} is not representable as a finite double")]
    UnrepresentableNumber(String),
}

/// Error while decoding a 32-byte digest.
///
/// A digest error is always a malformed-input condition. It is never
/// reported as a failed (or passed) verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// The hex text was not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// The digest decoded to the wrong number of bytes.
    #[error("digest must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}
