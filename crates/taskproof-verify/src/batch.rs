//! # Batch Runs
//!
//! Verifies a list of artifact files in order. A file that cannot be read or
//! parsed is recorded with its error and counted as failed; the run always
//! continues to the next file.

use std::path::{Path, PathBuf};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::MalformedArtifact;
use crate::verdict::{Verdict, VerdictStatus};
use crate::verifier::ArtifactVerifier;

/// Result for one file in a batch.
#[derive(Debug)]
pub struct BatchEntry {
    /// The file as requested.
    pub path: PathBuf,
    /// Its verdict, or why no verdict could be produced.
    pub outcome: Result<Verdict, MalformedArtifact>,
}

impl BatchEntry {
    /// Whether this entry counts as passed.
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, Ok(verdict) if verdict.overall_passed)
    }

    /// Single-label status, `Malformed` for errors.
    pub fn status(&self) -> VerdictStatus {
        match &self.outcome {
            Ok(verdict) => verdict.status(),
            Err(_) => VerdictStatus::Malformed,
        }
    }
}

impl Serialize for BatchEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BatchEntry", 4)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("status", &self.status())?;
        match &self.outcome {
            Ok(verdict) => {
                s.serialize_field("verdict", verdict)?;
                s.skip_field("error")?;
            }
            Err(e) => {
                s.skip_field("verdict")?;
                s.serialize_field("error", &e.to_string())?;
            }
        }
        s.end()
    }
}

/// Aggregate result of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// Entries that passed.
    pub passed: usize,
    /// Entries that failed or were malformed.
    pub failed: usize,
    /// One entry per input path, in input order.
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// True when every entry passed. An empty batch passes.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs an [`ArtifactVerifier`] over many files.
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    verifier: ArtifactVerifier,
}

impl BatchRunner {
    /// Create a runner around `verifier`.
    pub fn new(verifier: ArtifactVerifier) -> Self {
        Self { verifier }
    }

    /// Verify one file.
    pub fn run_one(&self, path: &Path) -> BatchEntry {
        let outcome = self.verifier.verify_file(path);
        match &outcome {
            Ok(verdict) => tracing::info!(
                path = %path.display(),
                status = %verdict.status(),
                "artifact verified"
            ),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "malformed artifact"),
        }
        BatchEntry {
            path: path.to_path_buf(),
            outcome,
        }
    }

    /// Verify every path, sequentially, keeping input order.
    pub fn run_all(&self, paths: &[PathBuf]) -> BatchReport {
        let entries: Vec<BatchEntry> = paths.iter().map(|p| self.run_one(p)).collect();
        let passed = entries.iter().filter(|e| e.passed()).count();
        BatchReport {
            passed,
            failed: entries.len() - passed,
            entries,
        }
    }
}
