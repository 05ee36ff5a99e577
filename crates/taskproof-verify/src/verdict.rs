//! # Verdicts
//!
//! The result of verifying one artifact. A verdict separates three things a
//! reader must not confuse:
//!
//! - `merkle_valid`: no sampled path failed to reach the claimed root.
//! - `signature`: an informational check of the summary signature.
//! - `caveats`: the limits of what was actually checked.
//!
//! `overall_passed` follows `merkle_valid` alone. [`VerdictStatus`] folds the
//! verdict into a single label for reports.

use serde::Serialize;
use taskproof_crypto::PathOutcome;

use crate::artifact::ArtifactForm;
use crate::payload::PayloadCandidate;

/// Per-sample outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleResult {
    /// Index of the sampled task.
    pub task_index: u64,
    /// Result of folding its authentication path.
    pub outcome: PathOutcome,
}

/// Result of the signature check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SignatureStatus {
    /// No signature present, or the artifact form carries none.
    NotApplicable,
    /// Signature checking was turned off for this run.
    Skipped,
    /// A payload candidate verified.
    Valid {
        /// The candidate that matched.
        candidate: PayloadCandidate,
    },
    /// The signature could not be checked or matched no candidate.
    Invalid {
        /// Why.
        reason: String,
    },
}

/// A limit on what a passing verdict actually establishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Caveat {
    /// The artifact carries a root hash only; no leaf was checked.
    NoLeafEvidence,
    /// The artifact contains no sampled leaves.
    NoSamples,
    /// Some samples have empty paths and were not checked.
    UnverifiableSamples {
        /// How many.
        count: usize,
    },
    /// A sample names a task index outside the claimed leaf count.
    SampleIndexOutOfRange {
        /// The sample's index.
        task_index: u64,
        /// The claimed leaf count.
        leaf_count: u64,
    },
    /// The summary signature did not verify.
    SignatureMismatch {
        /// Why.
        reason: String,
    },
}

impl std::fmt::Display for Caveat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoLeafEvidence => {
                f.write_str("root hash only; no per-leaf evidence was checked")
            }
            Self::NoSamples => f.write_str("no sampled leaves; Merkle validity is vacuous"),
            Self::UnverifiableSamples { count } => {
                write!(f, "{count} sample(s) carry an empty path and were not checked")
            }
            Self::SampleIndexOutOfRange {
                task_index,
                leaf_count,
            } => write!(
                f,
                "sample task_index {task_index} is outside the claimed {leaf_count} leaves"
            ),
            Self::SignatureMismatch { reason } => write!(f, "signature not verified: {reason}"),
        }
    }
}

/// Single-label summary of a verification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    /// Passed, at least one sample checked, nothing to qualify.
    FullyVerified,
    /// Passed, at least one sample checked, with caveats.
    VerifiedWithCaveats,
    /// Passed, but no sample was actually checked.
    Unverifiable,
    /// At least one sampled path did not reach the root.
    Failed,
    /// The artifact could not be parsed.
    Malformed,
}

impl VerdictStatus {
    /// Upper-case label for reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullyVerified => "FULLY_VERIFIED",
            Self::VerifiedWithCaveats => "VERIFIED_WITH_CAVEATS",
            Self::Unverifiable => "UNVERIFIABLE",
            Self::Failed => "FAILED",
            Self::Malformed => "MALFORMED",
        }
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full result of verifying one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Which artifact form was verified.
    pub form: ArtifactForm,
    /// No sampled path was `Invalid`. Vacuously true with no samples.
    pub merkle_valid: bool,
    /// Signature check result.
    pub signature: SignatureStatus,
    /// One entry per sample, in artifact order.
    pub samples: Vec<SampleResult>,
    /// Claimed leaf count; `None` for the simplified form.
    pub leaf_count: Option<u64>,
    /// Whether any per-leaf evidence was examined.
    pub leaf_evidence_checked: bool,
    /// Qualifications on the result.
    pub caveats: Vec<Caveat>,
    /// Equal to `merkle_valid`.
    pub overall_passed: bool,
}

impl Verdict {
    /// `Some(valid)` when a signature was checked, `None` otherwise.
    pub fn signature_valid(&self) -> Option<bool> {
        match self.signature {
            SignatureStatus::NotApplicable | SignatureStatus::Skipped => None,
            SignatureStatus::Valid { .. } => Some(true),
            SignatureStatus::Invalid { .. } => Some(false),
        }
    }

    /// Number of samples whose path reached the root.
    pub fn valid_samples(&self) -> usize {
        self.count(PathOutcome::Valid)
    }

    /// Number of samples with an empty path.
    pub fn unverifiable_samples(&self) -> usize {
        self.count(PathOutcome::Unverifiable)
    }

    fn count(&self, outcome: PathOutcome) -> usize {
        self.samples.iter().filter(|s| s.outcome == outcome).count()
    }

    /// Fold this verdict into a single status.
    pub fn status(&self) -> VerdictStatus {
        if !self.overall_passed {
            VerdictStatus::Failed
        } else if self.valid_samples() == 0 {
            VerdictStatus::Unverifiable
        } else if self.caveats.is_empty() {
            VerdictStatus::FullyVerified
        } else {
            VerdictStatus::VerifiedWithCaveats
        }
    }
}
