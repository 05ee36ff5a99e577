//! # taskproof-crypto: Cryptographic Primitives
//!
//! The building blocks the artifact verifier composes:
//!
//! - **SHA-256** hash codec over raw bytes, digest pairs, and
//!   [`CanonicalBytes`](taskproof_core::CanonicalBytes).
//! - **Merkle authentication paths**: ordered left/right sibling folds from a
//!   leaf digest to a claimed root, with an explicit `Unverifiable` outcome
//!   for empty paths.
//! - **Ed25519** verification of signatures over canonical payloads, with
//!   public keys supplied as PEM, base64 (raw or DER SubjectPublicKeyInfo),
//!   or hex.
//!
//! ## Crate Policy
//!
//! - Depends only on `taskproof-core` internally.
//! - All functions are pure; no I/O.
//! - No mocking of cryptographic operations in tests; all tests use real
//!   SHA-256 and real Ed25519.

pub mod ed25519;
pub mod error;
pub mod merkle;
pub mod sha256;

// Re-export primary types.
pub use ed25519::{Ed25519PublicKey, Ed25519Signature};
pub use error::CryptoError;
pub use merkle::{compute_root, verify_path, MerkleTree, PathOutcome, PathStep, Position};
pub use sha256::{sha256, sha256_canonical, sha256_pair};
