//! # Signature Payload Resolution
//!
//! Producers have signed different projections of the artifact over time.
//! The verifier does not know which one a given signature covers, so it
//! reconstructs each candidate payload in a fixed order and accepts the
//! first one the signature verifies against.
//!
//! Candidates are built from the artifact's original document, so member
//! values keep exactly the spelling the producer wrote. A member missing
//! from the document is omitted from the candidate rather than written as
//! `null`. Every candidate is canonicalized with RFC 8785 (JCS) before
//! verification.

use serde::Serialize;
use serde_json::{Map, Value};
use taskproof_core::{CanonicalBytes, CanonicalizationError};
use taskproof_crypto::{ed25519, sha256_canonical, Ed25519PublicKey, Ed25519Signature};

use crate::artifact::StandardArtifact;

/// One of the payload layouts a signature may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadCandidate {
    /// `{benchmark, system, merkle_root}`.
    MetadataRoot,
    /// `{version, claim, benchmark, system, merkle_commitment: {merkle_root, merkle_leaves}}`.
    VersionedCommitment,
    /// The whole document without its top-level `signature` member.
    FullDocument,
}

impl PayloadCandidate {
    /// All candidates, in the order they are tried.
    pub const ALL: [PayloadCandidate; 3] = [
        PayloadCandidate::MetadataRoot,
        PayloadCandidate::VersionedCommitment,
        PayloadCandidate::FullDocument,
    ];

    /// One-based position in [`Self::ALL`].
    pub fn index(self) -> u8 {
        match self {
            Self::MetadataRoot => 1,
            Self::VersionedCommitment => 2,
            Self::FullDocument => 3,
        }
    }

    /// Stable name used in reports and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::MetadataRoot => "metadata_root",
            Self::VersionedCommitment => "versioned_commitment",
            Self::FullDocument => "full_document",
        }
    }

    /// Project this candidate's layout out of an artifact document.
    pub fn project(self, document: &Map<String, Value>) -> Value {
        let proof = document
            .get("cryptographic_proof")
            .and_then(Value::as_object);
        let proof_member = |key: &str| proof.and_then(|p| p.get(key)).cloned();

        match self {
            Self::MetadataRoot => {
                let mut out = Map::new();
                copy_member(&mut out, document, "benchmark");
                copy_member(&mut out, document, "system");
                insert_some(&mut out, "merkle_root", proof_member("merkle_root"));
                Value::Object(out)
            }
            Self::VersionedCommitment => {
                let mut commitment = Map::new();
                insert_some(&mut commitment, "merkle_root", proof_member("merkle_root"));
                insert_some(&mut commitment, "merkle_leaves", proof_member("merkle_leaves"));

                let mut out = Map::new();
                copy_member(&mut out, document, "version");
                copy_member(&mut out, document, "claim");
                copy_member(&mut out, document, "benchmark");
                copy_member(&mut out, document, "system");
                out.insert("merkle_commitment".to_string(), Value::Object(commitment));
                Value::Object(out)
            }
            Self::FullDocument => {
                let mut out = document.clone();
                out.remove("signature");
                Value::Object(out)
            }
        }
    }

    /// Canonical bytes of this candidate for `artifact`.
    pub fn build(
        self,
        artifact: &StandardArtifact,
    ) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::from_value(&self.project(&artifact.document))
    }
}

impl std::fmt::Display for PayloadCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

fn copy_member(out: &mut Map<String, Value>, document: &Map<String, Value>, key: &str) {
    insert_some(out, key, document.get(key).cloned());
}

fn insert_some(out: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        out.insert(key.to_string(), value);
    }
}

/// Outcome of trying every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignatureCheck {
    /// Whether any candidate verified.
    pub valid: bool,
    /// The first candidate that verified.
    pub matched: Option<PayloadCandidate>,
}

/// Try each candidate in order and stop at the first that verifies.
pub fn resolve_signature(
    artifact: &StandardArtifact,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> SignatureCheck {
    for candidate in PayloadCandidate::ALL {
        let payload = match candidate.build(artifact) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    candidate = candidate.name(),
                    error = %e,
                    "candidate payload could not be built"
                );
                continue;
            }
        };
        let matched = ed25519::verify(&payload, signature, public_key).is_ok();
        tracing::debug!(
            candidate = candidate.name(),
            payload_sha256 = %sha256_canonical(&payload).short_hex(),
            payload_len = payload.len(),
            matched,
            "signature candidate"
        );
        if matched {
            return SignatureCheck {
                valid: true,
                matched: Some(candidate),
            };
        }
    }
    SignatureCheck {
        valid: false,
        matched: None,
    }
}
