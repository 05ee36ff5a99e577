//! # Malformed Artifacts
//!
//! Every structural problem with an input artifact maps to one
//! `MalformedArtifact` variant. A malformed artifact is never reported as a
//! failed verification; it is a distinct outcome with its own status.

use std::path::PathBuf;

use taskproof_core::DigestError;
use thiserror::Error;

/// The artifact could not be read, parsed, or classified.
#[derive(Error, Debug)]
pub enum MalformedArtifact {
    /// The artifact file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The top-level JSON value is not an object.
    #[error("artifact must be a JSON object")]
    NotAnObject,

    /// Neither the standard nor the simplified shape is recognizable.
    #[error(
        "unrecognized artifact shape: expected a `benchmark` section (standard form) \
         or a `tasks` count (simplified form)"
    )]
    UnrecognizedShape,

    /// A required field is missing or has the wrong JSON type.
    #[error("{form} artifact: {source}")]
    Schema {
        /// Which artifact form was being parsed.
        form: &'static str,
        /// Deserializer error naming the offending field.
        #[source]
        source: serde_json::Error,
    },

    /// A digest field is not exactly 32 bytes of hex.
    #[error("invalid digest in `{field}`: {source}")]
    Digest {
        /// Dotted path of the offending field.
        field: String,
        /// What was wrong with it.
        #[source]
        source: DigestError,
    },
}
