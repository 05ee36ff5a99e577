//! # taskproof-cli: Proof Artifact Verifier CLI
//!
//! Provides the `taskproof` command-line interface over the
//! `taskproof-verify` engine.
//!
//! ```bash
//! taskproof verify run_proof.json
//! taskproof verify --all --dir ./results --format json
//! taskproof -v verify --merkle-only proof.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing, configuration, and report rendering live here.
//!   Verification logic lives in `taskproof-verify`.
//! - Reports go to stdout, logs to stderr.

pub mod config;
pub mod discover;
pub mod report;
pub mod verify;
