//! Error handling
//!
//! Every variant here is fatal to a session: artifacts that fail to load
//! stop startup, and a classifier that fails mid-run ends the form.
//! Unmapped labels are not errors (see `logic::fire_type`).

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    #[error("Failed to read artifact {}: {source}", .path.display())]
    ArtifactUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {}: {reason}", .path.display())]
    ArtifactMalformed { path: PathBuf, reason: String },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Inference failed: {0}")]
    Inference(String),
}

impl ClassifierError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ClassifierError::ArtifactMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
