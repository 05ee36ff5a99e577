//! # taskproof-core: Foundational Types for Proof Verification
//!
//! This crate is the leaf of the taskproof workspace. It defines the
//! primitives every other crate builds on:
//!
//! 1. **`CanonicalBytes` newtype.** All bytes that are handed to signature
//!    verification flow through `CanonicalBytes::new()`, which produces
//!    RFC 8785 (JCS) output. No raw `serde_json::to_vec()` for signed
//!    payloads. Two conformant verifiers therefore reconstruct byte-identical
//!    candidate payloads from the same artifact.
//!
//! 2. **`HashDigest` newtype.** A 32-byte digest that can only be built
//!    through length-checked constructors. A leaf or sibling hash of the
//!    wrong size is a malformed-input error at the parsing boundary and can
//!    never reach the Merkle fold.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `taskproof-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{HashDigest, DIGEST_LEN};
pub use error::{CanonicalizationError, DigestError};
