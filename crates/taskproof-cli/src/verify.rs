//! # Verify Subcommand
//!
//! `taskproof verify <FILE>...` checks the named artifacts.
//! `taskproof verify --all [--dir DIR]` discovers artifacts by name first.
//!
//! Exit code 0 means every requested artifact passed. Any failed or
//! malformed artifact makes it 1.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use taskproof_verify::{ArtifactVerifier, BatchRunner, VerifyOptions};

use crate::config::{CliConfig, OutputFormat};
use crate::discover::discover;
use crate::report::render;

/// Arguments for the `taskproof verify` subcommand.
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Artifact files to verify.
    #[arg(value_name = "FILE", conflicts_with = "all")]
    pub files: Vec<PathBuf>,

    /// Verify every artifact in the directory whose name matches the
    /// discovery rule (default: contains `proof`, ends in `.json`).
    #[arg(long)]
    pub all: bool,

    /// Directory scanned by `--all`. Defaults to the current directory.
    #[arg(long, value_name = "DIR", requires = "all")]
    pub dir: Option<PathBuf>,

    /// Check Merkle samples only; do not check signatures.
    #[arg(long)]
    pub merkle_only: bool,

    /// Report format. Overrides the config file and environment.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the verify subcommand and print the report to stdout.
///
/// Returns exit code: 0 when all artifacts pass, 1 otherwise.
pub fn run_verify(args: &VerifyArgs, config: &CliConfig) -> Result<u8> {
    let paths = resolve_targets(args, config)?;
    if paths.is_empty() {
        println!("Usage: taskproof verify <FILE>... | --all [--dir DIR]");
        return Ok(1);
    }

    let options = verify_options(args, config);
    let format = args.format.unwrap_or(config.format);
    tracing::info!(
        artifacts = paths.len(),
        skip_signature = options.skip_signature,
        "verifying"
    );

    let report = BatchRunner::new(ArtifactVerifier::new(options)).run_all(&paths);
    print!("{}", render(&report, format)?);

    Ok(if report.all_passed() { 0 } else { 1 })
}

/// The flag and the config file both turn signature checks off.
fn verify_options(args: &VerifyArgs, config: &CliConfig) -> VerifyOptions {
    VerifyOptions {
        skip_signature: args.merkle_only || config.merkle_only,
    }
}

fn resolve_targets(args: &VerifyArgs, config: &CliConfig) -> Result<Vec<PathBuf>> {
    if !args.all {
        return Ok(args.files.clone());
    }
    let dir = args.dir.as_deref().unwrap_or(Path::new("."));
    let found = discover(dir, &config.discovery)?;
    if found.is_empty() {
        bail!(
            "no proof artifacts found in {} (looking for *{}*.{})",
            dir.display(),
            config.discovery.contains,
            config.discovery.extension
        );
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::render_text;
    use taskproof_crypto::{sha256, MerkleTree};

    fn write_standard(dir: &Path, name: &str, tamper: bool) -> PathBuf {
        let leaves: Vec<_> = (0..6).map(|i| sha256(format!("t{i}").as_bytes())).collect();
        let tree = MerkleTree::build(&leaves).unwrap();
        let path_json: Vec<String> = tree.paths[4]
            .iter()
            .map(|s| format!(r#"{{"hash":"{}","position":"{}"}}"#, s.sibling, s.position))
            .collect();
        let leaf = if tamper { sha256(b"forged") } else { leaves[4] };
        let doc = format!(
            r#"{{"benchmark":{{"tasks_completed":6}},"cryptographic_proof":{{"merkle_root":"{}","merkle_leaves":6,"sample_proofs":[{{"task_index":4,"leaf_hash":"{}","merkle_proof":[{}]}}]}}}}"#,
            tree.root,
            leaf,
            path_json.join(",")
        );
        let path = dir.join(name);
        std::fs::write(&path, doc).unwrap();
        path
    }

    #[test]
    fn named_files_all_pass() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            files: vec![
                write_standard(dir.path(), "a_proof.json", false),
                write_standard(dir.path(), "b_proof.json", false),
            ],
            ..Default::default()
        };
        assert_eq!(run_verify(&args, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn tampered_file_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            files: vec![
                write_standard(dir.path(), "a_proof.json", false),
                write_standard(dir.path(), "b_proof.json", true),
            ],
            ..Default::default()
        };
        assert_eq!(run_verify(&args, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn unreadable_named_file_exits_one() {
        let args = VerifyArgs {
            files: vec![PathBuf::from("/nonexistent/proof.json")],
            ..Default::default()
        };
        assert_eq!(run_verify(&args, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn all_discovers_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        write_standard(dir.path(), "run_proof.json", false);
        // Would fail if picked up.
        write_standard(dir.path(), "scratch.json", true);
        let args = VerifyArgs {
            all: true,
            dir: Some(dir.path().to_path_buf()),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        assert_eq!(run_verify(&args, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn all_with_nothing_found_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            all: true,
            dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = run_verify(&args, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("no proof artifacts found"));
    }

    /// A standard artifact carrying a well-formed signature block whose
    /// value signs nothing.
    fn write_corrupt_signature(dir: &Path, name: &str) -> PathBuf {
        let path = write_standard(dir, name, false);
        let mut doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        doc["signature"] = serde_json::json!({
            "algorithm": "Ed25519",
            "value": "00".repeat(64),
            "public_key": "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        });
        std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
        path
    }

    fn report_text(args: &VerifyArgs, config: &CliConfig) -> String {
        let verifier = ArtifactVerifier::new(verify_options(args, config));
        render_text(&BatchRunner::new(verifier).run_all(&args.files))
    }

    #[test]
    fn merkle_only_renders_signature_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            files: vec![write_corrupt_signature(dir.path(), "signed_proof.json")],
            merkle_only: true,
            ..Default::default()
        };
        let text = report_text(&args, &CliConfig::default());
        assert!(text.starts_with("FULLY_VERIFIED: "), "{text}");
        assert!(text.contains("signature: skipped"), "{text}");
        assert!(!text.contains("caveat:"), "{text}");
        assert_eq!(run_verify(&args, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn merkle_only_from_config_renders_signature_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            files: vec![write_corrupt_signature(dir.path(), "signed_proof.json")],
            ..Default::default()
        };
        let config = CliConfig {
            merkle_only: true,
            ..Default::default()
        };
        assert!(report_text(&args, &config).contains("signature: skipped"));
    }

    #[test]
    fn corrupt_signature_is_reported_without_merkle_only() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            files: vec![write_corrupt_signature(dir.path(), "signed_proof.json")],
            ..Default::default()
        };
        let text = report_text(&args, &CliConfig::default());
        assert!(text.contains("signature: invalid"), "{text}");
        assert!(text.contains("caveat:"), "{text}");
    }

    #[test]
    fn no_targets_prints_usage() {
        assert_eq!(
            run_verify(&VerifyArgs::default(), &CliConfig::default()).unwrap(),
            1
        );
    }
}
