//! Artifact Manifest - SHA-256 pinning for the model and scaler files.
//!
//! Optional. When configured, both artifacts are hashed before they are
//! loaded and any difference stops startup.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ClassifierError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactManifest {
    /// Hex SHA-256 of the classifier model file
    pub model_sha256: String,
    /// Hex SHA-256 of the scaler file
    pub scaler_sha256: String,
}

impl ArtifactManifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading artifact manifest from: {}", path.display());

        if !path.exists() {
            return Err(ClassifierError::ArtifactMissing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            ClassifierError::ArtifactUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        serde_json::from_str(&content).map_err(|e| ClassifierError::malformed(path, e.to_string()))
    }

    /// Check both artifacts against the pinned digests
    pub fn verify(&self, model_path: &Path, scaler_path: &Path) -> Result<()> {
        verify_checksum(model_path, &self.model_sha256)?;
        verify_checksum(scaler_path, &self.scaler_sha256)?;
        log::info!("Artifact checksums verified");
        Ok(())
    }
}

/// Hex SHA-256 of a file, streamed
pub fn sha256_file(path: &Path) -> Result<String> {
    let unreadable = |source: std::io::Error| ClassifierError::ArtifactUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = file.read(&mut buf).map_err(unreadable)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compare a file's digest with an expected hex string (case-insensitive)
pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    if !path.exists() {
        return Err(ClassifierError::ArtifactMissing(path.to_path_buf()));
    }

    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(ClassifierError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.trim().to_string(),
            actual,
        });
    }

    log::debug!("Checksum OK: {} ({})", path.display(), actual);
    Ok(())
}
