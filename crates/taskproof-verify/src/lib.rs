//! # taskproof-verify: Proof Artifact Verification
//!
//! Turns an artifact file into a [`Verdict`]:
//!
//! 1. [`classify`] resolves the JSON document to a [`ProofArtifact`]
//!    (standard or simplified) or a [`MalformedArtifact`] error.
//! 2. [`ArtifactVerifier`] folds every sampled authentication path against
//!    the claimed root and checks the optional signature through the
//!    ordered [`PayloadCandidate`] list.
//! 3. [`BatchRunner`] repeats this over many files and never aborts on a
//!    single bad input.
//!
//! Merkle validity covers the sampled leaves only. A verdict records how
//! many leaves were sampled out of how many were claimed, and its caveats
//! state what was not checked.

pub mod artifact;
pub mod batch;
pub mod classify;
pub mod error;
pub mod payload;
pub mod verdict;
pub mod verifier;

pub use artifact::{
    ArtifactForm, ArtifactSignature, ProofArtifact, SampleProof, SimplifiedArtifact,
    StandardArtifact,
};
pub use batch::{BatchEntry, BatchReport, BatchRunner};
pub use classify::{classify, detect_form};
pub use error::MalformedArtifact;
pub use payload::{resolve_signature, PayloadCandidate, SignatureCheck};
pub use verdict::{Caveat, SampleResult, SignatureStatus, Verdict, VerdictStatus};
pub use verifier::{ArtifactVerifier, VerifyOptions};
