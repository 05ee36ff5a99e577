//! # Artifact Classification
//!
//! Resolves a parsed JSON document to exactly one artifact form, once, at
//! the entry point. Downstream code matches on [`ProofArtifact`] and never
//! inspects raw field presence again.
//!
//! Rule: an object without a `benchmark` section that carries a `tasks`
//! count is simplified; an object with a `benchmark` section is standard;
//! anything else is malformed.

use serde_json::Value;

use crate::artifact::{ArtifactForm, ProofArtifact, SimplifiedArtifact, StandardArtifact};
use crate::error::MalformedArtifact;

/// Decide the artifact form from top-level field presence alone.
pub fn detect_form(value: &Value) -> Result<ArtifactForm, MalformedArtifact> {
    let obj = value.as_object().ok_or(MalformedArtifact::NotAnObject)?;
    match (obj.contains_key("benchmark"), obj.contains_key("tasks")) {
        (true, _) => Ok(ArtifactForm::Standard),
        (false, true) => Ok(ArtifactForm::Simplified),
        (false, false) => Err(MalformedArtifact::UnrecognizedShape),
    }
}

/// Classify and fully parse a document.
pub fn classify(value: &Value) -> Result<ProofArtifact, MalformedArtifact> {
    let form = detect_form(value)?;
    let document = value.as_object().ok_or(MalformedArtifact::NotAnObject)?;
    match form {
        ArtifactForm::Standard => {
            StandardArtifact::from_document(document.clone()).map(ProofArtifact::Standard)
        }
        ArtifactForm::Simplified => {
            SimplifiedArtifact::from_document(document).map(ProofArtifact::Simplified)
        }
    }
}
