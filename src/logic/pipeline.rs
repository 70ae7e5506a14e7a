//! Classification Pipeline
//!
//! readings → assemble → scale → classify → resolve.
//!
//! `AppContext` owns the two artifacts for the life of the process and is
//! passed by reference to whoever runs predictions. Nothing here is global,
//! so tests swap in their own `Scaler` / `Classifier`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::logic::config::ArtifactConfig;
use crate::logic::features::{
    assemble, layout_hash, FeatureVector, LayoutInfo, ScaledFeatureVector, SensorReadings, FEATURE_VERSION,
};
use crate::logic::fire_type::FireType;
use crate::logic::model::{
    ArtifactManifest, Classifier, OnnxClassifier, PredictedLabel, Scaler, StandardScaler,
};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Everything one prediction produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub features: FeatureVector,
    pub scaled: ScaledFeatureVector,
    pub label: PredictedLabel,
    pub fire_type: FireType,
    pub inference_time_us: u64,
    pub predicted_at: chrono::DateTime<chrono::Utc>,
}

impl Prediction {
    /// Display string for the form
    pub fn display(&self) -> &'static str {
        self.fire_type.as_str()
    }
}

/// Engine Status for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_name: String,
    pub scaler_name: String,
    pub layout: LayoutInfo,
    pub prediction_count: u64,
    pub avg_latency_ms: f32,
}

// ============================================================================
// APPLICATION CONTEXT
// ============================================================================

pub struct AppContext {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    model_name: String,
    scaler_name: String,
    latency_sum_us: AtomicU64,
    prediction_count: AtomicU64,
}

impl AppContext {
    /// Wrap already-loaded artifacts
    pub fn new(scaler: Box<dyn Scaler>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            scaler,
            classifier,
            model_name: "None".to_string(),
            scaler_name: "None".to_string(),
            latency_sum_us: AtomicU64::new(0),
            prediction_count: AtomicU64::new(0),
        }
    }

    pub fn with_names(mut self, model_name: impl Into<String>, scaler_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self.scaler_name = scaler_name.into();
        self
    }

    /// Load both artifacts; any failure here is fatal for the process.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        log::info!(
            "Feature layout v{} (hash: {:08x})",
            FEATURE_VERSION,
            layout_hash()
        );

        if let Some(manifest_path) = &config.manifest_path {
            let manifest = ArtifactManifest::load(manifest_path)?;
            manifest.verify(&config.model_path, &config.scaler_path)?;
        }

        let scaler = StandardScaler::load(&config.scaler_path)?;
        let classes = scaler.classes().map(|c| c.to_vec());
        let classifier = OnnxClassifier::load(&config.model_path, classes)?;
        log::info!(
            "Artifacts ready ({} features, model loaded at {})",
            classifier.metadata().features,
            classifier.metadata().loaded_at.to_rfc3339()
        );

        Ok(Self::new(Box::new(scaler), Box::new(classifier)).with_names(
            config.model_path.display().to_string(),
            config.scaler_path.display().to_string(),
        ))
    }

    /// Scale and classify one feature vector
    pub fn predict_label(&self, features: &FeatureVector) -> Result<(ScaledFeatureVector, PredictedLabel)> {
        let scaled = self.scaler.transform(features);
        let labels = self.classifier.predict(std::slice::from_ref(&scaled))?;

        let label = labels
            .first()
            .copied()
            .ok_or_else(|| ClassifierError::Inference("classifier returned no label".to_string()))?;

        Ok((scaled, label))
    }

    /// Full pipeline for one set of readings
    pub fn classify(&self, readings: &SensorReadings) -> Result<Prediction> {
        let start_time = std::time::Instant::now();

        let features = assemble(readings);
        let (scaled, label) = self.predict_label(&features)?;
        let fire_type = FireType::from_label(label);

        let inference_time_us = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(inference_time_us, Ordering::Relaxed);
        self.prediction_count.fetch_add(1, Ordering::Relaxed);

        log::debug!(
            "features={} scaled={} label={} ({}us)",
            features.to_log_entry(),
            scaled.to_log_entry(),
            label,
            inference_time_us
        );

        Ok(Prediction {
            features,
            scaled,
            label,
            fire_type,
            inference_time_us,
            predicted_at: chrono::Utc::now(),
        })
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.prediction_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_name: self.model_name.clone(),
            scaler_name: self.scaler_name.clone(),
            layout: LayoutInfo::current(),
            prediction_count: count,
            avg_latency_ms: avg,
        }
    }
}
