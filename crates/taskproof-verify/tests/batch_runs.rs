//! # Batch Runs Over Files on Disk

mod common;

use std::path::PathBuf;

use common::{simplified_doc, standard_doc, write_json};
use serde_json::json;
use taskproof_verify::{ArtifactVerifier, BatchRunner, MalformedArtifact, VerdictStatus};

#[test]
fn mixed_batch_keeps_order_and_counts_malformed_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad_root = standard_doc(8, &[1]);
    bad_root["cryptographic_proof"]["merkle_root"] = json!("ab".repeat(32));

    let paths: Vec<PathBuf> = vec![
        write_json(dir.path(), "a_proof.json", &standard_doc(8, &[1, 6])),
        write_json(dir.path(), "b_proof.json", &json!({"unrelated": true})),
        write_json(dir.path(), "c_proof.json", &simplified_doc()),
        write_json(dir.path(), "d_proof.json", &bad_root),
        dir.path().join("missing_proof.json"),
    ];
    std::fs::write(dir.path().join("e_proof.json"), b"{ truncated").unwrap();
    let mut paths = paths;
    paths.push(dir.path().join("e_proof.json"));

    let report = BatchRunner::new(ArtifactVerifier::default()).run_all(&paths);

    assert_eq!(report.entries.len(), paths.len());
    for (entry, path) in report.entries.iter().zip(&paths) {
        assert_eq!(&entry.path, path);
    }
    let statuses: Vec<VerdictStatus> = report.entries.iter().map(|e| e.status()).collect();
    assert_eq!(
        statuses,
        vec![
            VerdictStatus::FullyVerified,
            VerdictStatus::Malformed,
            VerdictStatus::Unverifiable,
            VerdictStatus::Failed,
            VerdictStatus::Malformed,
            VerdictStatus::Malformed,
        ]
    );
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 4);
    assert!(!report.all_passed());
    assert!(matches!(
        report.entries[4].outcome,
        Err(MalformedArtifact::Unreadable { .. })
    ));
    assert!(matches!(
        report.entries[5].outcome,
        Err(MalformedArtifact::InvalidJson(_))
    ));
}

#[test]
fn all_good_batch_passes() {
    let dir = tempfile::tempdir().unwrap();
    let paths: Vec<PathBuf> = (1..=5)
        .map(|n| write_json(dir.path(), &format!("run{n}_proof.json"), &standard_doc(n * 3, &[0])))
        .collect();
    let report = BatchRunner::default().run_all(&paths);
    assert!(report.all_passed());
    assert_eq!(report.passed, 5);
}

#[test]
fn report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_json(dir.path(), "ok_proof.json", &standard_doc(4, &[2])),
        write_json(dir.path(), "bad_proof.json", &json!([1, 2])),
    ];
    let report = BatchRunner::default().run_all(&paths);
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["passed"], 1);
    assert_eq!(value["entries"][0]["status"], "FULLY_VERIFIED");
    assert_eq!(value["entries"][0]["verdict"]["merkle_valid"], true);
    assert_eq!(value["entries"][1]["status"], "MALFORMED");
    assert_eq!(value["entries"][1]["error"], "artifact must be a JSON object");
}
