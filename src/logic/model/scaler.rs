//! Feature Scaler
//!
//! Per-feature standardization `(x - mean) / scale` with parameters fitted
//! at training time. Loaded once from a JSON artifact; never refitted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::logic::features::layout::{check_feature_names, layout_hash};
use crate::logic::features::{FeatureVector, ScaledFeatureVector, FEATURE_COUNT};
use crate::logic::model::inference::PredictedLabel;

// ============================================================================
// SCALER TRAIT
// ============================================================================

/// Pure, deterministic feature transform
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> ScaledFeatureVector;
}

// ============================================================================
// ARTIFACT FORMAT
// ============================================================================

/// On-disk scaler parameters.
///
/// `mean_` / `scale_` are accepted as aliases so a fitted scaler's
/// attributes can be dumped as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    #[serde(alias = "mean_")]
    pub mean: Vec<f64>,
    #[serde(alias = "scale_")]
    pub scale: Vec<f64>,
    #[serde(default, alias = "feature_names_in_", skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_hash: Option<u32>,
    /// Class value for each score column of the classifier, in column order
    #[serde(default, alias = "classes_", skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<PredictedLabel>>,
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
    classes: Option<Vec<PredictedLabel>>,
    source: Option<PathBuf>,
}

impl StandardScaler {
    /// Build from fitted parameters.
    ///
    /// A zero scale marks a constant feature; it is centered but not divided.
    pub fn new(mean: [f64; FEATURE_COUNT], scale: [f64; FEATURE_COUNT]) -> Self {
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self {
            mean,
            scale,
            classes: None,
            source: None,
        }
    }

    /// Identity transform (mean 0, scale 1)
    pub fn identity() -> Self {
        Self::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT])
    }

    /// Validate artifact parameters against the compiled layout
    pub fn from_params(params: ScalerParams, path: &Path) -> Result<Self> {
        if let Some(names) = &params.feature_names {
            check_feature_names(names).map_err(|reason| {
                ClassifierError::SchemaMismatch(format!("scaler {}: {}", path.display(), reason))
            })?;
        }

        if let Some(hash) = params.layout_hash {
            let expected = layout_hash();
            if hash != expected {
                return Err(ClassifierError::SchemaMismatch(format!(
                    "scaler {} was fit for layout {:08x}, current layout is {:08x}",
                    path.display(),
                    hash,
                    expected
                )));
            }
        }

        let mean = to_array(&params.mean, "mean", path)?;
        let scale = to_array(&params.scale, "scale", path)?;

        if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s < 0.0) {
            return Err(ClassifierError::malformed(
                path,
                format!("scale[{}] = {} is not a valid standard deviation", i, scale[i]),
            ));
        }
        if let Some(i) = mean.iter().position(|m| !m.is_finite()) {
            return Err(ClassifierError::malformed(
                path,
                format!("mean[{}] is not finite", i),
            ));
        }

        if let Some(classes) = &params.classes {
            if classes.is_empty() {
                return Err(ClassifierError::malformed(path, "'classes' is empty"));
            }
        }

        let mut scaler = Self::new(mean, scale);
        scaler.classes = params.classes;
        scaler.source = Some(path.to_path_buf());
        Ok(scaler)
    }

    /// Load scaler artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading scaler from: {}", path.display());

        if !path.exists() {
            return Err(ClassifierError::ArtifactMissing(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| {
            ClassifierError::ArtifactUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let params: ScalerParams = serde_json::from_str(&content)
            .map_err(|e| ClassifierError::malformed(path, e.to_string()))?;

        let scaler = Self::from_params(params, path)?;
        log::info!("Scaler loaded ({} features)", FEATURE_COUNT);
        Ok(scaler)
    }

    pub fn mean(&self) -> &[f64; FEATURE_COUNT] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_COUNT] {
        &self.scale
    }

    /// Class list shipped with the training artifacts, if any
    pub fn classes(&self) -> Option<&[PredictedLabel]> {
        self.classes.as_deref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> ScaledFeatureVector {
        let mut scaled = [0.0f64; FEATURE_COUNT];

        for i in 0..FEATURE_COUNT {
            scaled[i] = (features.values[i] - self.mean[i]) / self.scale[i];
        }

        ScaledFeatureVector::from_values(scaled)
    }
}

fn to_array(values: &[f64], field: &str, path: &Path) -> Result<[f64; FEATURE_COUNT]> {
    <[f64; FEATURE_COUNT]>::try_from(values).map_err(|_| {
        ClassifierError::SchemaMismatch(format!(
            "scaler {}: '{}' has {} entries, expected {}",
            path.display(),
            field,
            values.len(),
            FEATURE_COUNT
        ))
    })
}
