//! # Artifact Verifier
//!
//! Applies the verdict policy to a classified artifact.
//!
//! ## Policy
//!
//! - **Simplified form:** the root hash is an opaque commitment with no leaf
//!   evidence. It passes, and the verdict says so through the
//!   `NoLeafEvidence` caveat.
//! - **Standard form:** every sampled path is folded against the claimed
//!   root. Any `Invalid` sample fails the artifact. Empty paths are counted
//!   as unverifiable, never as valid.
//! - **Signature:** checked when present and not skipped, reported on the
//!   verdict, and never used to fail the artifact.

use std::path::Path;

use serde_json::Value;
use taskproof_crypto::{ed25519, verify_path, Ed25519PublicKey, Ed25519Signature, PathOutcome};

use crate::artifact::{ArtifactForm, ArtifactSignature, ProofArtifact, StandardArtifact};
use crate::classify::classify;
use crate::error::MalformedArtifact;
use crate::payload::resolve_signature;
use crate::verdict::{Caveat, SampleResult, SignatureStatus, Verdict};

/// Knobs for a verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Do not check signatures; report them as skipped.
    pub skip_signature: bool,
}

/// Stateless verifier applying one set of [`VerifyOptions`].
#[derive(Debug, Clone, Default)]
pub struct ArtifactVerifier {
    options: VerifyOptions,
}

impl ArtifactVerifier {
    /// Create a verifier.
    pub fn new(options: VerifyOptions) -> Self {
        Self { options }
    }

    /// The options this verifier applies.
    pub fn options(&self) -> VerifyOptions {
        self.options
    }

    /// Read, parse, classify, and verify the artifact at `path`.
    pub fn verify_file(&self, path: &Path) -> Result<Verdict, MalformedArtifact> {
        let bytes = std::fs::read(path).map_err(|source| MalformedArtifact::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.verify_bytes(&bytes)
    }

    /// Parse and verify raw JSON bytes.
    pub fn verify_bytes(&self, bytes: &[u8]) -> Result<Verdict, MalformedArtifact> {
        let value: Value = serde_json::from_slice(bytes).map_err(MalformedArtifact::InvalidJson)?;
        self.verify_document(&value)
    }

    /// Classify and verify a parsed JSON document.
    pub fn verify_document(&self, value: &Value) -> Result<Verdict, MalformedArtifact> {
        let artifact = classify(value)?;
        Ok(self.verify(&artifact))
    }

    /// Verify a classified artifact.
    pub fn verify(&self, artifact: &ProofArtifact) -> Verdict {
        match artifact {
            ProofArtifact::Simplified(simplified) => {
                tracing::debug!(
                    tasks = simplified.task_count,
                    root = %simplified.root_hash.short_hex(),
                    "simplified artifact carries no leaf evidence"
                );
                Verdict {
                    form: ArtifactForm::Simplified,
                    merkle_valid: true,
                    signature: SignatureStatus::NotApplicable,
                    samples: Vec::new(),
                    leaf_count: None,
                    leaf_evidence_checked: false,
                    caveats: vec![Caveat::NoLeafEvidence],
                    overall_passed: true,
                }
            }
            ProofArtifact::Standard(standard) => self.verify_standard(standard),
        }
    }

    fn verify_standard(&self, artifact: &StandardArtifact) -> Verdict {
        let mut caveats = Vec::new();

        let samples: Vec<SampleResult> = artifact
            .samples
            .iter()
            .map(|sample| {
                let outcome = verify_path(&sample.leaf_hash, &sample.path, &artifact.merkle_root);
                tracing::debug!(
                    task_index = sample.task_index,
                    leaf = %sample.leaf_hash.short_hex(),
                    steps = sample.path.len(),
                    outcome = outcome.as_str(),
                    "sample checked"
                );
                SampleResult {
                    task_index: sample.task_index,
                    outcome,
                }
            })
            .collect();

        if samples.is_empty() {
            caveats.push(Caveat::NoSamples);
        }
        let unverifiable = samples
            .iter()
            .filter(|s| s.outcome == PathOutcome::Unverifiable)
            .count();
        if unverifiable > 0 {
            caveats.push(Caveat::UnverifiableSamples {
                count: unverifiable,
            });
        }
        for sample in &artifact.samples {
            if sample.task_index >= artifact.leaf_count {
                caveats.push(Caveat::SampleIndexOutOfRange {
                    task_index: sample.task_index,
                    leaf_count: artifact.leaf_count,
                });
            }
        }

        let merkle_valid = samples.iter().all(|s| s.outcome != PathOutcome::Invalid);
        if !merkle_valid {
            tracing::warn!(
                root = %artifact.merkle_root.short_hex(),
                "sampled path does not reach the claimed Merkle root"
            );
        }

        let signature = self.check_signature(artifact);
        if let SignatureStatus::Invalid { reason } = &signature {
            tracing::warn!(%reason, "signature not verified");
            caveats.push(Caveat::SignatureMismatch {
                reason: reason.clone(),
            });
        }

        Verdict {
            form: ArtifactForm::Standard,
            merkle_valid,
            signature,
            leaf_evidence_checked: samples.iter().any(|s| s.outcome != PathOutcome::Unverifiable),
            samples,
            leaf_count: Some(artifact.leaf_count),
            caveats,
            overall_passed: merkle_valid,
        }
    }

    fn check_signature(&self, artifact: &StandardArtifact) -> SignatureStatus {
        let Some(block) = &artifact.signature else {
            return SignatureStatus::NotApplicable;
        };
        if self.options.skip_signature {
            return SignatureStatus::Skipped;
        }
        let (signature, public_key) = match decode_signature(block) {
            Ok(decoded) => decoded,
            Err(e) => {
                return SignatureStatus::Invalid {
                    reason: e.to_string(),
                }
            }
        };
        let check = resolve_signature(artifact, &signature, &public_key);
        match check.matched {
            Some(candidate) => {
                tracing::debug!(candidate = candidate.name(), "signature verified");
                SignatureStatus::Valid { candidate }
            }
            None => SignatureStatus::Invalid {
                reason: "no payload candidate matched".to_string(),
            },
        }
    }
}

fn decode_signature(
    block: &ArtifactSignature,
) -> Result<(Ed25519Signature, Ed25519PublicKey), taskproof_crypto::CryptoError> {
    ed25519::ensure_ed25519(block.algorithm.as_deref())?;
    let public_key = Ed25519PublicKey::parse(&block.public_key)?;
    let signature = Ed25519Signature::from_hex(&block.value)?;
    Ok((signature, public_key))
}
