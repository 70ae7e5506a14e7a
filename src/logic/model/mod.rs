//! Model Module - Scaler and Classifier artifacts
//!
//! Both are loaded once at startup and treated as pure functions after.
//! Dễ dàng swap model: the pipeline only sees the `Scaler` and
//! `Classifier` traits.

pub mod inference;
pub mod manifest;
pub mod scaler;

// Re-export common types
pub use inference::{Classifier, ModelMetadata, OnnxClassifier, PredictedLabel};
pub use manifest::ArtifactManifest;
pub use scaler::{Scaler, ScalerParams, StandardScaler};
