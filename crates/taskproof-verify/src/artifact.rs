//! # Proof Artifacts
//!
//! The two artifact shapes a producer may emit, as a closed tagged union.
//!
//! - [`StandardArtifact`]: claim, benchmark summary, system info, a Merkle
//!   commitment with sampled authentication paths, and an optional Ed25519
//!   signature.
//! - [`SimplifiedArtifact`]: a task count and a root hash, nothing else.
//!
//! Parsing goes through `serde` wire structs that mirror the JSON layout.
//! Digests travel as hex strings on the wire and are converted to
//! [`HashDigest`] here, with the dotted field path attached to any length or
//! hex error so the report names the exact offending value.

use serde::Deserialize;
use serde_json::{Map, Value};
use taskproof_core::HashDigest;
use taskproof_crypto::{PathStep, Position};

use crate::error::MalformedArtifact;

/// A parsed proof artifact. The two variants never convert into each other.
#[derive(Debug, Clone)]
pub enum ProofArtifact {
    /// Full metadata, sampled paths, optional signature.
    Standard(StandardArtifact),
    /// Root hash only; carries no per-leaf evidence.
    Simplified(SimplifiedArtifact),
}

impl ProofArtifact {
    /// Which form this artifact has.
    pub fn form(&self) -> ArtifactForm {
        match self {
            Self::Standard(_) => ArtifactForm::Standard,
            Self::Simplified(_) => ArtifactForm::Simplified,
        }
    }
}

/// Artifact form tag, carried into the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactForm {
    /// See [`StandardArtifact`].
    Standard,
    /// See [`SimplifiedArtifact`].
    Simplified,
}

impl std::fmt::Display for ArtifactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Simplified => f.write_str("simplified"),
        }
    }
}

/// One sampled leaf with its authentication path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleProof {
    /// Position of the task in the committed sequence.
    pub task_index: u64,
    /// The committed leaf digest.
    pub leaf_hash: HashDigest,
    /// Authentication path, leaf to root. May be empty.
    pub path: Vec<PathStep>,
}

/// The signature block of a standard artifact, as supplied.
///
/// Fields stay as text; decoding happens during signature verification so
/// that an undecodable signature is reported as a signature caveat rather
/// than making the whole artifact malformed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactSignature {
    /// Declared algorithm. Absent means Ed25519.
    #[serde(default)]
    pub algorithm: Option<String>,
    /// Signature value, hex encoded.
    pub value: String,
    /// Signer public key: PEM, base64, or hex.
    pub public_key: String,
}

/// Standard-form artifact.
#[derive(Debug, Clone)]
pub struct StandardArtifact {
    /// Producer format version, any JSON value.
    pub version: Option<Value>,
    /// Human-readable claim.
    pub claim: Option<String>,
    /// Opaque benchmark summary.
    pub benchmark: Value,
    /// Opaque system description.
    pub system: Option<Value>,
    /// Claimed Merkle root over all task leaves.
    pub merkle_root: HashDigest,
    /// Claimed number of leaves under `merkle_root`.
    pub leaf_count: u64,
    /// Sampled leaves, in artifact order.
    pub samples: Vec<SampleProof>,
    /// Optional signature over summary metadata.
    pub signature: Option<ArtifactSignature>,
    /// The complete document as read. Signature payload candidates are
    /// projected from here so that values keep the producer's spelling.
    pub document: Map<String, Value>,
}

/// Simplified-form artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedArtifact {
    /// Number of tasks the root claims to commit to.
    pub task_count: u64,
    /// Claimed root hash. Opaque to this tool.
    pub root_hash: HashDigest,
    /// Reported run duration in milliseconds.
    pub duration_ms: f64,
    /// Hardware label reported by the producer.
    pub hardware: String,
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct StandardWire {
    #[serde(default)]
    version: Option<Value>,
    #[serde(default)]
    claim: Option<String>,
    benchmark: Value,
    #[serde(default)]
    system: Option<Value>,
    cryptographic_proof: ProofWire,
    #[serde(default)]
    signature: Option<ArtifactSignature>,
}

#[derive(Deserialize)]
struct ProofWire {
    merkle_root: String,
    merkle_leaves: u64,
    sample_proofs: Vec<SampleWire>,
}

#[derive(Deserialize)]
struct SampleWire {
    task_index: u64,
    leaf_hash: String,
    #[serde(default)]
    merkle_proof: Vec<StepWire>,
}

#[derive(Deserialize)]
struct StepWire {
    hash: String,
    position: Position,
}

#[derive(Deserialize)]
struct SimplifiedWire {
    tasks: u64,
    #[serde(rename = "totalDuration")]
    total_duration: f64,
    #[serde(rename = "rootHash")]
    root_hash: String,
    hardware: String,
}

fn digest_field(
    text: &str,
    field: impl FnOnce() -> String,
) -> Result<HashDigest, MalformedArtifact> {
    HashDigest::from_hex(text).map_err(|source| MalformedArtifact::Digest {
        field: field(),
        source,
    })
}

impl StandardArtifact {
    /// Parse a standard artifact from its top-level JSON object.
    pub fn from_document(document: Map<String, Value>) -> Result<Self, MalformedArtifact> {
        let wire: StandardWire = serde_json::from_value(Value::Object(document.clone()))
            .map_err(|source| MalformedArtifact::Schema {
                form: "standard",
                source,
            })?;

        let proof = wire.cryptographic_proof;
        let merkle_root = digest_field(&proof.merkle_root, || {
            "cryptographic_proof.merkle_root".to_string()
        })?;

        let samples = proof
            .sample_proofs
            .into_iter()
            .enumerate()
            .map(|(i, sample)| -> Result<SampleProof, MalformedArtifact> {
                let leaf_hash = digest_field(&sample.leaf_hash, || {
                    format!("cryptographic_proof.sample_proofs[{i}].leaf_hash")
                })?;
                let path = sample
                    .merkle_proof
                    .iter()
                    .enumerate()
                    .map(|(j, step)| -> Result<PathStep, MalformedArtifact> {
                        let sibling = digest_field(&step.hash, || {
                            format!("cryptographic_proof.sample_proofs[{i}].merkle_proof[{j}].hash")
                        })?;
                        Ok(PathStep::new(sibling, step.position))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SampleProof {
                    task_index: sample.task_index,
                    leaf_hash,
                    path,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: wire.version,
            claim: wire.claim,
            benchmark: wire.benchmark,
            system: wire.system,
            merkle_root,
            leaf_count: proof.merkle_leaves,
            samples,
            signature: wire.signature,
            document,
        })
    }
}

impl SimplifiedArtifact {
    /// Parse a simplified artifact from its top-level JSON object.
    pub fn from_document(document: &Map<String, Value>) -> Result<Self, MalformedArtifact> {
        let wire: SimplifiedWire = serde_json::from_value(Value::Object(document.clone()))
            .map_err(|source| MalformedArtifact::Schema {
                form: "simplified",
                source,
            })?;
        Ok(Self {
            task_count: wire.tasks,
            root_hash: digest_field(&wire.root_hash, || "rootHash".to_string())?,
            duration_ms: wire.total_duration,
            hardware: wire.hardware,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn hex(byte: u8) -> String {
        format!("{byte:02x}").repeat(32)
    }

    #[test]
    fn test_standard_parses_samples_and_paths() {
        let doc = object(json!({
            "claim": "c",
            "benchmark": {"tasks_completed": 4},
            "system": {"os": "linux"},
            "cryptographic_proof": {
                "merkle_root": hex(1),
                "merkle_leaves": 4,
                "sample_proofs": [
                    {"task_index": 2, "leaf_hash": hex(2), "merkle_proof": [
                        {"hash": hex(3), "position": "left"},
                        {"hash": hex(4), "position": "right"}
                    ]},
                    {"task_index": 3, "leaf_hash": hex(5)}
                ]
            }
        }));
        let artifact = StandardArtifact::from_document(doc).unwrap();
        assert_eq!(artifact.leaf_count, 4);
        assert_eq!(artifact.samples.len(), 2);
        assert_eq!(artifact.samples[0].path.len(), 2);
        assert_eq!(artifact.samples[0].path[0].position, Position::Left);
        assert!(artifact.samples[1].path.is_empty());
        assert!(artifact.signature.is_none());
        assert_eq!(artifact.claim.as_deref(), Some("c"));
    }

    #[test]
    fn test_short_sibling_names_field() {
        let doc = object(json!({
            "benchmark": {},
            "cryptographic_proof": {
                "merkle_root": hex(1),
                "merkle_leaves": 2,
                "sample_proofs": [
                    {"task_index": 0, "leaf_hash": hex(2), "merkle_proof": [
                        {"hash": "abcd", "position": "right"}
                    ]}
                ]
            }
        }));
        match StandardArtifact::from_document(doc) {
            Err(MalformedArtifact::Digest { field, .. }) => {
                assert_eq!(field, "cryptographic_proof.sample_proofs[0].merkle_proof[0].hash");
            }
            other => panic!("expected digest error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_position_is_schema_error() {
        let doc = object(json!({
            "benchmark": {},
            "cryptographic_proof": {
                "merkle_root": hex(1),
                "merkle_leaves": 2,
                "sample_proofs": [
                    {"task_index": 0, "leaf_hash": hex(2), "merkle_proof": [
                        {"hash": hex(3), "position": "middle"}
                    ]}
                ]
            }
        }));
        assert!(matches!(
            StandardArtifact::from_document(doc),
            Err(MalformedArtifact::Schema { form: "standard", .. })
        ));
    }

    #[test]
    fn test_missing_merkle_root_is_schema_error() {
        let doc = object(json!({
            "benchmark": {},
            "cryptographic_proof": {"merkle_leaves": 2, "sample_proofs": []}
        }));
        let err = StandardArtifact::from_document(doc).unwrap_err();
        assert!(err.to_string().contains("merkle_root"), "got: {err}");
    }

    #[test]
    fn test_signature_block_parsed() {
        let doc = object(json!({
            "benchmark": {},
            "cryptographic_proof": {"merkle_root": hex(1), "merkle_leaves": 0, "sample_proofs": []},
            "signature": {"algorithm": "Ed25519", "value": "00", "public_key": "AAAA"}
        }));
        let artifact = StandardArtifact::from_document(doc).unwrap();
        let sig = artifact.signature.unwrap();
        assert_eq!(sig.algorithm.as_deref(), Some("Ed25519"));
        assert_eq!(sig.public_key, "AAAA");
    }

    #[test]
    fn test_simplified_parses() {
        let doc = object(json!({
            "tasks": 1000,
            "totalDuration": 1234.5,
            "rootHash": hex(9),
            "hardware": "M2 Max"
        }));
        let artifact = SimplifiedArtifact::from_document(&doc).unwrap();
        assert_eq!(artifact.task_count, 1000);
        assert_eq!(artifact.root_hash, HashDigest::new([9u8; 32]));
        assert_eq!(artifact.hardware, "M2 Max");
    }

    #[test]
    fn test_simplified_bad_root_names_field() {
        let doc = object(json!({
            "tasks": 1, "totalDuration": 1, "rootHash": "00", "hardware": "x"
        }));
        match SimplifiedArtifact::from_document(&doc) {
            Err(MalformedArtifact::Digest { field, .. }) => assert_eq!(field, "rootHash"),
            other => panic!("expected digest error, got {other:?}"),
        }
    }
}
