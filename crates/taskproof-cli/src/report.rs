//! Report rendering.
//!
//! Text output prints one status line per artifact followed by its caveats,
//! then a summary. Every standard-form line states how many leaves were
//! sampled out of how many were committed, since Merkle validity covers the
//! sampled leaves only.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use taskproof_verify::{ArtifactForm, BatchEntry, BatchReport, SignatureStatus, Verdict};

use crate::config::OutputFormat;

/// Render `report` in `format`.
pub fn render(report: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("failed to serialize report")
        }
    }
}

/// Plain-text report.
pub fn render_text(report: &BatchReport) -> String {
    let mut out = String::new();
    for entry in &report.entries {
        write_entry(&mut out, entry);
    }
    let _ = writeln!(
        out,
        "\n{}/{} artifact(s) passed",
        report.passed,
        report.entries.len()
    );
    out
}

fn write_entry(out: &mut String, entry: &BatchEntry) {
    let status = entry.status();
    match &entry.outcome {
        Ok(verdict) => {
            let _ = writeln!(
                out,
                "{status}: {} ({})",
                entry.path.display(),
                summary(verdict)
            );
            for caveat in &verdict.caveats {
                let _ = writeln!(out, "  caveat: {caveat}");
            }
        }
        Err(e) => {
            let _ = writeln!(out, "{status}: {}: {e}", entry.path.display());
        }
    }
}

fn summary(verdict: &Verdict) -> String {
    let mut parts = vec![verdict.form.to_string()];
    if verdict.form == ArtifactForm::Standard {
        let leaves = verdict.leaf_count.unwrap_or_default();
        parts.push(format!(
            "{} of {leaves} leaves sampled, {} valid",
            verdict.samples.len(),
            verdict.valid_samples()
        ));
    }
    parts.push(format!("signature: {}", signature_label(&verdict.signature)));
    parts.join(", ")
}

fn signature_label(status: &SignatureStatus) -> String {
    match status {
        SignatureStatus::NotApplicable => "n/a".to_string(),
        SignatureStatus::Skipped => "skipped".to_string(),
        SignatureStatus::Valid { candidate } => format!("valid, payload {candidate}"),
        SignatureStatus::Invalid { .. } => "invalid".to_string(),
    }
}
