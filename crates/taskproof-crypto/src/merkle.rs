//! # Merkle Authentication Paths
//!
//! Recomputes a Merkle root from a leaf digest and an ordered list of
//! sibling digests, each tagged with the side it occupies.
//!
//! ## Algorithm
//!
//! `current = leaf`; for each step from leaf toward root:
//! - `Left`:  `current = SHA256(sibling || current)`
//! - `Right`: `current = SHA256(current || sibling)`
//!
//! The path verifies iff the final `current` equals the claimed root.
//! Nodes are plain `SHA256(left || right)`; there is no leaf/node prefix.
//!
//! ## Empty paths
//!
//! A sample that ships no path carries no evidence. `verify_path` reports
//! [`PathOutcome::Unverifiable`] for it regardless of whether the leaf
//! happens to equal the root. An empty path is never `Valid`.
//!
//! ## Cost
//!
//! Verification touches only the sampled path: `O(path length)` hashes,
//! independent of how many leaves the root commits to.

use serde::{Deserialize, Serialize};
use taskproof_core::HashDigest;

use crate::error::CryptoError;
use crate::sha256::sha256_pair;

/// Side a sibling occupies relative to the accumulated hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Sibling is concatenated before the accumulated hash.
    Left,
    /// Sibling is concatenated after the accumulated hash.
    Right,
}

impl Position {
    /// The opposite side.
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Wire name (`"left"` / `"right"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of an authentication path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// The sibling digest at this level.
    pub sibling: HashDigest,
    /// Which side the sibling is on.
    pub position: Position,
}

impl PathStep {
    /// Construct a path step.
    pub fn new(sibling: HashDigest, position: Position) -> Self {
        Self { sibling, position }
    }

    /// Fold one level: combine the accumulated hash with this sibling.
    pub fn apply(&self, current: &HashDigest) -> HashDigest {
        match self.position {
            Position::Left => sha256_pair(&self.sibling, current),
            Position::Right => sha256_pair(current, &self.sibling),
        }
    }
}

/// Outcome of checking one sampled leaf against the claimed root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathOutcome {
    /// The path recomputes the claimed root.
    Valid,
    /// The path recomputes a different root: the artifact is inconsistent.
    Invalid,
    /// No path was supplied; nothing was checked.
    Unverifiable,
}

impl PathOutcome {
    /// Uppercase label used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
            Self::Unverifiable => "UNVERIFIABLE",
        }
    }
}

impl std::fmt::Display for PathOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fold `path` over `leaf` and return the resulting root.
///
/// An empty path returns the leaf itself; callers deciding validity must
/// use [`verify_path`], which treats that case as unverifiable.
pub fn compute_root(leaf: &HashDigest, path: &[PathStep]) -> HashDigest {
    path.iter().fold(*leaf, |current, step| step.apply(&current))
}

/// Verify that `leaf` authenticates to `expected_root` through `path`.
pub fn verify_path(
    leaf: &HashDigest,
    path: &[PathStep],
    expected_root: &HashDigest,
) -> PathOutcome {
    if path.is_empty() {
        return PathOutcome::Unverifiable;
    }
    if compute_root(leaf, path) == *expected_root {
        PathOutcome::Valid
    } else {
        PathOutcome::Invalid
    }
}

/// Untyped entry point over raw byte slices.
///
/// Every slice must be exactly 32 bytes. A wrong length is a malformed-input
/// error, reported as `Err`, never as `Invalid` or `Valid`.
pub fn verify_path_bytes(
    leaf: &[u8],
    path: &[(&[u8], Position)],
    expected_root: &[u8],
) -> Result<PathOutcome, CryptoError> {
    let leaf = HashDigest::from_slice(leaf)?;
    let root = HashDigest::from_slice(expected_root)?;
    let steps = path
        .iter()
        .map(|(sibling, position)| -> Result<PathStep, CryptoError> {
            Ok(PathStep::new(HashDigest::from_slice(sibling)?, *position))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(verify_path(&leaf, &steps, &root))
}

// ---------------------------------------------------------------------------
// Reference tree construction
// ---------------------------------------------------------------------------

/// A binary Merkle tree with an authentication path for every leaf.
///
/// Pairs adjacent nodes left to right. A trailing odd node is paired with
/// itself. Paths built here verify under [`verify_path`].
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// The committed root.
    pub root: HashDigest,
    /// `paths[i]` authenticates leaf `i`.
    pub paths: Vec<Vec<PathStep>>,
}

impl MerkleTree {
    /// Build the tree over `leaves`.
    pub fn build(leaves: &[HashDigest]) -> Result<Self, CryptoError> {
        if leaves.is_empty() {
            return Err(CryptoError::EmptyTree);
        }
        let mut paths: Vec<Vec<PathStep>> = vec![Vec::new(); leaves.len()];
        // Leaf index -> position of its ancestor in the current level.
        let mut positions: Vec<usize> = (0..leaves.len()).collect();
        let mut level: Vec<HashDigest> = leaves.to_vec();

        while level.len() > 1 {
            for (leaf_idx, pos) in positions.iter_mut().enumerate() {
                let sibling_pos = *pos ^ 1;
                let step = if sibling_pos >= level.len() {
                    PathStep::new(level[*pos], Position::Right)
                } else if sibling_pos < *pos {
                    PathStep::new(level[sibling_pos], Position::Left)
                } else {
                    PathStep::new(level[sibling_pos], Position::Right)
                };
                paths[leaf_idx].push(step);
                *pos /= 2;
            }

            level = level
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    sha256_pair(left, right)
                })
                .collect();
        }

        Ok(Self {
            root: level[0],
            paths,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn digest() -> impl Strategy<Value = HashDigest> {
        any::<[u8; 32]>().prop_map(HashDigest::new)
    }

    fn position() -> impl Strategy<Value = Position> {
        prop_oneof![Just(Position::Left), Just(Position::Right)]
    }

    fn path() -> impl Strategy<Value = Vec<PathStep>> {
        prop::collection::vec(
            (digest(), position()).prop_map(|(s, p)| PathStep::new(s, p)),
            1..20,
        )
    }

    proptest! {
        /// A path always verifies against the root it folds to.
        #[test]
        fn correct_path_is_valid(leaf in digest(), path in path()) {
            let root = compute_root(&leaf, &path);
            prop_assert_eq!(verify_path(&leaf, &path, &root), PathOutcome::Valid);
        }

        /// Flipping any single bit of any sibling breaks the path.
        #[test]
        fn sibling_bit_flip_is_detected(
            leaf in digest(),
            path in path(),
            step_sel in any::<prop::sample::Index>(),
            byte in 0usize..32,
            bit in 0u8..8,
        ) {
            let root = compute_root(&leaf, &path);
            let mut tampered = path.clone();
            let i = step_sel.index(tampered.len());
            let mut bytes = *tampered[i].sibling.as_bytes();
            bytes[byte] ^= 1 << bit;
            tampered[i].sibling = HashDigest::new(bytes);
            prop_assert_ne!(verify_path(&leaf, &tampered, &root), PathOutcome::Valid);
        }

        /// Swapping the side of any single step breaks the path.
        #[test]
        fn position_swap_is_detected(
            leaf in digest(),
            path in path(),
            step_sel in any::<prop::sample::Index>(),
        ) {
            let root = compute_root(&leaf, &path);
            let mut tampered = path.clone();
            let i = step_sel.index(tampered.len());
            tampered[i].position = tampered[i].position.flipped();
            prop_assert_ne!(verify_path(&leaf, &tampered, &root), PathOutcome::Valid);
        }

        /// Empty paths are unverifiable for any leaf/root pair.
        #[test]
        fn empty_path_always_unverifiable(leaf in digest(), root in digest()) {
            prop_assert_eq!(verify_path(&leaf, &[], &root), PathOutcome::Unverifiable);
        }
    }
}
