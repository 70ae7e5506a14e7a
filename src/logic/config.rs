//! Artifact Configuration
//!
//! Where the scaler, classifier and optional manifest live.
//! Can be read from the environment or set directly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// ONNX classifier
    pub model_path: PathBuf,
    /// Scaler parameters (JSON)
    pub scaler_path: PathBuf,
    /// SHA-256 manifest; no checksum verification when absent
    pub manifest_path: Option<PathBuf>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(constants::DEFAULT_MODEL_PATH),
            scaler_path: PathBuf::from(constants::DEFAULT_SCALER_PATH),
            manifest_path: None,
        }
    }
}

impl ArtifactConfig {
    pub fn from_env() -> Self {
        Self {
            model_path: PathBuf::from(constants::get_model_path()),
            scaler_path: PathBuf::from(constants::get_scaler_path()),
            manifest_path: constants::get_manifest_path().map(PathBuf::from),
        }
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    pub fn with_scaler(mut self, path: impl Into<PathBuf>) -> Self {
        self.scaler_path = path.into();
        self
    }

    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }
}
