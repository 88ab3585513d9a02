//! Manifest of generated files, persisted between `generate` and `check`.
//!
//! Saves a [`BridgeManifest`] to `<bindings_dir>/bridge_artifacts.json` after
//! `generate`. `check` uses the recorded digests to tell files that were edited
//! by hand apart from files that are merely out of date.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{BridgeError, Result};

pub const MANIFEST_FILE: &str = "bridge_artifacts.json";

/// What one `generate` run wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeManifest {
    pub namespace: String,
    /// Exported trampoline symbol.
    pub symbol: String,
    pub header_filename: String,
    pub files: Vec<ManifestEntry>,
}

/// A generated file, relative to the bindings directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the file contents as written.
    pub sha256: String,
}

impl BridgeManifest {
    /// Recorded digest for a relative path, if the file was generated.
    pub fn digest_of(&self, path: &Path) -> Option<&str> {
        self.files
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.sha256.as_str())
    }
}

/// Lowercase hex SHA-256 of `contents`.
pub fn digest(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    hex::encode(hasher.finalize())
}

/// Save the manifest to `<bindings_dir>/bridge_artifacts.json`.
pub fn save(manifest: &BridgeManifest, bindings_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(bindings_dir)?;
    let path = bindings_dir.join(MANIFEST_FILE);
    let json =
        serde_json::to_string_pretty(manifest).map_err(|e| BridgeError::ManifestParse {
            path: path.clone(),
            source: e,
        })?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Load the manifest from `<bindings_dir>/bridge_artifacts.json`.
///
/// Returns `Ok(None)` when no manifest has been written yet.
pub fn load(bindings_dir: &Path) -> Result<Option<BridgeManifest>> {
    let path = bindings_dir.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)?;
    let manifest = serde_json::from_str(&contents)
        .map_err(|e| BridgeError::ManifestParse { path, source: e })?;
    Ok(Some(manifest))
}
