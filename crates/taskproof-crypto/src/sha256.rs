//! # SHA-256 Hash Codec
//!
//! The single hash function of the proof scheme. Leaves, siblings and roots
//! are all SHA-256 outputs; interior nodes are `SHA256(left || right)` with
//! no domain-separation prefix.

use sha2::{Digest, Sha256};
use taskproof_core::{CanonicalBytes, HashDigest};

/// Compute SHA-256 of raw bytes.
pub fn sha256(bytes: &[u8]) -> HashDigest {
    finish(Sha256::new_with_prefix(bytes))
}

/// Compute the parent of two nodes: `SHA256(left || right)`.
pub fn sha256_pair(left: &HashDigest, right: &HashDigest) -> HashDigest {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    finish(hasher)
}

/// Fingerprint canonical bytes. Used to identify signature payloads in logs.
pub fn sha256_canonical(data: &CanonicalBytes) -> HashDigest {
    sha256(data.as_bytes())
}

fn finish(hasher: Sha256) -> HashDigest {
    let hash = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&hash);
    HashDigest::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector_empty() {
        assert_eq!(
            sha256(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_vector_abc() {
        assert_eq!(
            sha256(b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_pair_is_hash_of_concatenation() {
        let a = sha256(b"left");
        let b = sha256(b"right");
        let mut concat = Vec::with_capacity(64);
        concat.extend_from_slice(a.as_bytes());
        concat.extend_from_slice(b.as_bytes());
        assert_eq!(sha256_pair(&a, &b), sha256(&concat));
    }

    #[test]
    fn test_pair_is_order_sensitive() {
        let a = sha256(b"a");
        let b = sha256(b"b");
        assert_ne!(sha256_pair(&a, &b), sha256_pair(&b, &a));
    }

    #[test]
    fn test_canonical_fingerprint() {
        let cb = CanonicalBytes::new(&serde_json::json!({})).unwrap();
        // SHA256("{}")
        assert_eq!(
            sha256_canonical(&cb).to_hex(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }
}
