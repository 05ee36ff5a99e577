//! # Canonical Serialization: JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are checked against an artifact signature.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()` (or `from_value()`), which
//! writes RFC 8785 (JSON Canonicalization Scheme) output: object members
//! sorted by the UTF-16 code units of their names, compact separators,
//! ECMAScript number formatting and minimal string escaping.
//!
//! Signature verification in `taskproof-crypto` accepts only
//! `&CanonicalBytes`, so a payload cannot be verified in a whitespace- or
//! key-order-dependent encoding by accident.
//!
//! ## Numbers
//!
//! Every number is written as the IEEE-754 double it denotes, using the
//! ECMAScript `Number.prototype.toString` form (`ryu-js`). `1.0` is written
//! as `1`, `-0` as `0`, `1e21` as `1e+21`, and integers beyond 2^53 are
//! rounded to the nearest double (`9007199254740993` becomes
//! `9007199254740992`).

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructors are `CanonicalBytes::new()` and
///   `CanonicalBytes::from_value()`.
/// - Object members are sorted by the UTF-16 code units of their names
///   (not by UTF-8 bytes), separators are compact, and the output is valid
///   UTF-8 JSON.
/// - The same logical value always yields the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(&value)
    }

    /// Construct canonical bytes from an already-parsed JSON value.
    ///
    /// Used when the payload is a projection of a document read from disk;
    /// avoids a second round trip through `Serialize`.
    pub fn from_value(value: &Value) -> Result<Self, CanonicalizationError> {
        let mut out = String::new();
        write_value(&mut out, value)?;
        Ok(Self(out.into_bytes()))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn write_value(out: &mut String, value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(out, n)?,
        Value::String(s) => out.push_str(&serde_json::to_string(s)?),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        Value::Object(map) => write_object(out, map)?,
    }
    Ok(())
}

fn write_object(out: &mut String, map: &Map<String, Value>) -> Result<(), CanonicalizationError> {
    let mut members: Vec<(&String, &Value)> = map.iter().collect();
    members.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));

    out.push('{');
    for (i, (key, value)) in members.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&serde_json::to_string(key)?);
        out.push(':');
        write_value(out, value)?;
    }
    out.push('}');
    Ok(())
}

fn write_number(out: &mut String, n: &Number) -> Result<(), CanonicalizationError> {
    let f = n
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| CanonicalizationError::UnrepresentableNumber(n.to_string()))?;
    if f == 0.0 {
        out.push('0');
    } else {
        out.push_str(ryu_js::Buffer::new().format_finite(f));
    }
    Ok(())
}
