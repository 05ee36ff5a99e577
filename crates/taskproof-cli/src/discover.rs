//! Artifact discovery for `verify --all`.
//!
//! Scans one directory (not recursively) for regular files whose name
//! contains the configured substring and whose extension matches. Results
//! are sorted so reports are stable across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::DiscoveryConfig;

/// Whether `path` names a proof artifact under `rule`.
pub fn matches(path: &Path, rule: &DiscoveryConfig) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&rule.extension));
    extension_ok && name.contains(rule.contains.as_str())
}

/// List matching artifacts in `dir`, sorted.
pub fn discover(dir: &Path, rule: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && matches(&path, rule) {
            found.push(path);
        }
    }
    found.sort();
    tracing::debug!(dir = %dir.display(), count = found.len(), "discovered artifacts");
    Ok(found)
}
