//! # Ed25519 Verification
//!
//! Parses the public key and signature carried by a proof artifact and
//! verifies the signature over canonical payload bytes.
//!
//! ## Security Invariant
//!
//! - Verification input MUST be `&CanonicalBytes`. The verifier rebuilds the
//!   signed payload itself; it never verifies bytes as they happen to sit in
//!   the artifact file.
//! - Key material is validated on parse: a 32-byte string that is not a
//!   valid curve point is rejected up front.
//!
//! ## Key encodings
//!
//! Producers publish the key in whichever form their toolkit emits:
//! - PEM `-----BEGIN PUBLIC KEY-----` (SubjectPublicKeyInfo),
//! - 64 hex characters (raw key),
//! - base64 of the raw 32-byte key or of the DER SubjectPublicKeyInfo.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::Verifier;
use taskproof_core::CanonicalBytes;

use crate::error::CryptoError;

/// Algorithm name accepted in an artifact's `signature.algorithm` field.
pub const ALGORITHM: &str = "Ed25519";

/// An Ed25519 public key (32 bytes), validated as a curve point.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(ed25519_dalek::VerifyingKey);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature(pub [u8; 64]);

// ---------------------------------------------------------------------------
// Ed25519PublicKey impls
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Create a public key from raw 32 bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    /// Parse a public key from any of the supported text encodings.
    pub fn parse(text: &str) -> Result<Self, CryptoError> {
        let text = text.trim();
        if text.starts_with("-----BEGIN") {
            return ed25519_dalek::VerifyingKey::from_public_key_pem(text)
                .map(Self)
                .map_err(|e| CryptoError::InvalidPublicKey(format!("PEM: {e}")));
        }
        if text.len() == 64 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::from_hex(text);
        }
        let der = BASE64
            .decode(text)
            .map_err(|e| CryptoError::InvalidPublicKey(format!("base64: {e}")))?;
        match <[u8; 32]>::try_from(der.as_slice()) {
            Ok(raw) => Self::from_bytes(&raw),
            Err(_) => ed25519_dalek::VerifyingKey::from_public_key_der(&der)
                .map(Self)
                .map_err(|e| CryptoError::InvalidPublicKey(format!("DER: {e}"))),
        }
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(text: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(text.trim()).map_err(|e| CryptoError::HexDecode(e.to_string()))?;
        let raw = <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| {
            CryptoError::InvalidPublicKey(format!("expected 32 bytes, got {}", bytes.len()))
        })?;
        Self::from_bytes(&raw)
    }

    /// Return the raw 32-byte public key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }
}

impl From<ed25519_dalek::VerifyingKey> for Ed25519PublicKey {
    fn from(key: ed25519_dalek::VerifyingKey) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(self.0.as_bytes()))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature impls
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Return the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Render the signature as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a signature from a 128-character hex string.
    pub fn from_hex(text: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(text.trim()).map_err(|e| CryptoError::HexDecode(e.to_string()))?;
        let arr = <[u8; 64]>::try_from(bytes.as_slice())
            .map_err(|_| CryptoError::InvalidSignatureLength(bytes.len()))?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Reject any declared algorithm other than Ed25519.
///
/// An absent algorithm field means Ed25519. The comparison ignores case.
pub fn ensure_ed25519(algorithm: Option<&str>) -> Result<(), CryptoError> {
    match algorithm {
        None => Ok(()),
        Some(name) if name.trim().eq_ignore_ascii_case(ALGORITHM) => Ok(()),
        Some(name) => Err(CryptoError::UnsupportedAlgorithm(name.to_string())),
    }
}

/// Verify an Ed25519 signature over canonical bytes.
///
/// Returns `Ok(())` if valid, `Err(CryptoError::VerificationFailed)`
/// otherwise.
pub fn verify(
    data: &CanonicalBytes,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    public_key
        .0
        .verify(data.as_bytes(), &sig)
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
}

fn hex_prefix(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(4)])
}
