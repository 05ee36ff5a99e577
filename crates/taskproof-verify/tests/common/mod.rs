//! Shared fixtures: a real Merkle tree over synthetic task leaves, a fixed
//! signing key, and helpers to write artifacts to disk.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use base64::Engine;
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Value};
use taskproof_core::HashDigest;
use taskproof_crypto::{sha256, MerkleTree, Position};
use taskproof_verify::{PayloadCandidate, StandardArtifact};

pub fn leaf(i: usize) -> HashDigest {
    sha256(format!("{{\"task\":{i},\"result\":\"ok\"}}").as_bytes())
}

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[0x5a; 32])
}

/// Base64 of the raw 32-byte verifying key.
pub fn public_key_b64() -> String {
    base64::engine::general_purpose::STANDARD.encode(signing_key().verifying_key().to_bytes())
}

fn step_json(sibling: &HashDigest, position: Position) -> Value {
    json!({"hash": sibling.to_hex(), "position": position.as_str()})
}

/// A standard artifact over `leaf_count` leaves with paths for `sampled`.
pub fn standard_doc(leaf_count: usize, sampled: &[usize]) -> Value {
    let leaves: Vec<HashDigest> = (0..leaf_count).map(leaf).collect();
    let tree = MerkleTree::build(&leaves).unwrap();
    let samples: Vec<Value> = sampled
        .iter()
        .map(|&i| {
            let path: Vec<Value> = tree.paths[i]
                .iter()
                .map(|s| step_json(&s.sibling, s.position))
                .collect();
            json!({"task_index": i, "leaf_hash": leaves[i].to_hex(), "merkle_proof": path})
        })
        .collect();
    json!({
        "version": "1.0",
        "claim": format!("completed {leaf_count} tasks"),
        "benchmark": {"tasks_completed": leaf_count, "throughput_tps": 812.5},
        "system": {"os": "linux", "arch": "x86_64"},
        "cryptographic_proof": {
            "merkle_root": tree.root.to_hex(),
            "merkle_leaves": leaf_count,
            "sample_proofs": samples
        }
    })
}

pub fn simplified_doc() -> Value {
    json!({
        "tasks": 1000,
        "totalDuration": 15234.5,
        "rootHash": leaf(0).to_hex(),
        "hardware": "Apple M2 Max"
    })
}

/// Sign `doc` over `candidate` and attach the signature block.
pub fn sign_doc(mut doc: Value, candidate: PayloadCandidate) -> Value {
    let map = doc.as_object().cloned().unwrap();
    let artifact = StandardArtifact::from_document(map).unwrap();
    let payload = candidate.build(&artifact).unwrap();
    let sig = signing_key().sign(payload.as_bytes());
    doc["signature"] = json!({
        "algorithm": "Ed25519",
        "value": hex::encode(sig.to_bytes()),
        "public_key": public_key_b64()
    });
    doc
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}
