//! Pipeline tests with stand-in artifacts.

use std::fs;

use parking_lot::Mutex;
use tempfile::tempdir;

use crate::error::{ClassifierError, Result};
use crate::logic::config::ArtifactConfig;
use crate::logic::controller::{ControllerState, PredictController};
use crate::logic::features::{
    ConfidenceLevel, FeatureVector, LayoutInfo, ScaledFeatureVector, SensorReadings, FEATURE_COUNT,
};
use crate::logic::fire_type::FireType;
use crate::logic::model::{Classifier, PredictedLabel, Scaler, StandardScaler};
use crate::logic::pipeline::AppContext;

// ============================================================================
// TEST DOUBLES
// ============================================================================

/// Identity scaler that remembers what it was given
#[derive(Default)]
struct RecordingScaler {
    seen: Mutex<Vec<FeatureVector>>,
}

impl Scaler for RecordingScaler {
    fn transform(&self, features: &FeatureVector) -> ScaledFeatureVector {
        self.seen.lock().push(*features);
        ScaledFeatureVector::from_values(features.values)
    }
}

/// Always answers the same label; records batch sizes
struct FixedClassifier {
    label: PredictedLabel,
    batch_sizes: Mutex<Vec<usize>>,
}

impl FixedClassifier {
    fn new(label: PredictedLabel) -> Self {
        Self {
            label,
            batch_sizes: Mutex::new(Vec::new()),
        }
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
        self.batch_sizes.lock().push(batch.len());
        Ok(vec![self.label; batch.len()])
    }
}

/// Label from the sign of the scaled FRP: above mean → 0, below → 3
struct FrpSignClassifier;

impl Classifier for FrpSignClassifier {
    fn predict(&self, batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
        Ok(batch
            .iter()
            .map(|v| if v.values[2] >= 0.0 { 0 } else { 3 })
            .collect())
    }
}

struct FailingClassifier;

impl Classifier for FailingClassifier {
    fn predict(&self, _batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
        Err(ClassifierError::Inference("input dimension mismatch".to_string()))
    }
}

struct SilentClassifier;

impl Classifier for SilentClassifier {
    fn predict(&self, _batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
        Ok(Vec::new())
    }
}

fn context_with_label(label: PredictedLabel) -> AppContext {
    AppContext::new(
        Box::new(StandardScaler::identity()),
        Box::new(FixedClassifier::new(label)),
    )
}

// ============================================================================
// PIPELINE
// ============================================================================

#[test]
fn test_scaler_sees_assembled_vector() {
    let scaler = std::sync::Arc::new(RecordingScaler::default());

    struct Shared(std::sync::Arc<RecordingScaler>);
    impl Scaler for Shared {
        fn transform(&self, features: &FeatureVector) -> ScaledFeatureVector {
            self.0.transform(features)
        }
    }

    let ctx = AppContext::new(
        Box::new(Shared(scaler.clone())),
        Box::new(FixedClassifier::new(0)),
    );
    ctx.classify(&SensorReadings::default()).unwrap();

    let seen = scaler.seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].values, [300.0, 290.0, 15.0, 1.0, 1.0, 1.0]);
}

#[test]
fn test_classifier_gets_single_vector_batch() {
    let classifier = std::sync::Arc::new(FixedClassifier::new(2));

    struct Shared(std::sync::Arc<FixedClassifier>);
    impl Classifier for Shared {
        fn predict(&self, batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
            self.0.predict(batch)
        }
    }

    let ctx = AppContext::new(
        Box::new(StandardScaler::identity()),
        Box::new(Shared(classifier.clone())),
    );
    ctx.classify(&SensorReadings::default()).unwrap();
    ctx.classify(&SensorReadings::default()).unwrap();

    assert_eq!(*classifier.batch_sizes.lock(), vec![1, 1]);
}

#[test]
fn test_label_scenarios_through_pipeline() {
    let cases = [
        (0, "Vegetation Fire"),
        (2, "Other Static Land Source"),
        (3, "Offshore Fire"),
        (1, "Unknown"),
        (99, "Unknown"),
        (-7, "Unknown"),
    ];

    for (label, expected) in cases {
        let prediction = context_with_label(label)
            .classify(&SensorReadings::default())
            .unwrap();
        assert_eq!(prediction.label, label);
        assert_eq!(prediction.display(), expected);
    }
}

#[test]
fn test_scaling_applied_before_classification() {
    let scaler = StandardScaler::new(
        [300.0, 290.0, 20.0, 1.0, 1.0, 1.0],
        [1.0; FEATURE_COUNT],
    );
    let ctx = AppContext::new(Box::new(scaler), Box::new(FrpSignClassifier));

    let low_frp = ctx.classify(&SensorReadings::default()).unwrap();
    assert_eq!(low_frp.scaled.values[2], -5.0);
    assert_eq!(low_frp.fire_type, FireType::OffshoreFire);

    let high_frp = ctx
        .classify(&SensorReadings {
            frp: 50.0,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(high_frp.fire_type, FireType::VegetationFire);
}

#[test]
fn test_pipeline_is_deterministic() {
    let scaler = StandardScaler::new(
        [310.0, 295.0, 25.0, 1.5, 1.2, 1.0],
        [12.0, 8.0, 30.0, 0.6, 0.3, 0.7],
    );
    let ctx = AppContext::new(Box::new(scaler), Box::new(FrpSignClassifier));

    let readings = SensorReadings {
        brightness: 342.7,
        bright_t31: 301.2,
        frp: 31.4,
        scan: 1.3,
        track: 1.1,
        confidence: ConfidenceLevel::High,
    };

    let first = ctx.classify(&readings).unwrap();
    for _ in 0..10 {
        let again = ctx.classify(&readings).unwrap();
        assert_eq!(again.features, first.features);
        assert_eq!(again.scaled, first.scaled);
        assert_eq!(again.label, first.label);
    }
}

#[test]
fn test_classifier_failure_is_error() {
    let ctx = AppContext::new(Box::new(StandardScaler::identity()), Box::new(FailingClassifier));
    let err = ctx.classify(&SensorReadings::default()).unwrap_err();
    assert!(matches!(err, ClassifierError::Inference(_)));
}

#[test]
fn test_empty_classifier_output_is_error() {
    let ctx = AppContext::new(Box::new(StandardScaler::identity()), Box::new(SilentClassifier));
    assert!(ctx.classify(&SensorReadings::default()).is_err());
}

#[test]
fn test_status_counts_predictions() {
    let ctx = context_with_label(0).with_names("model.onnx", "scaler.json");
    assert_eq!(ctx.status().prediction_count, 0);
    assert_eq!(ctx.status().avg_latency_ms, 0.0);

    ctx.classify(&SensorReadings::default()).unwrap();
    ctx.classify(&SensorReadings::default()).unwrap();

    let status = ctx.status();
    assert_eq!(status.prediction_count, 2);
    assert_eq!(status.model_name, "model.onnx");
    assert_eq!(status.scaler_name, "scaler.json");
    assert_eq!(status.layout, LayoutInfo::current());
}

// ============================================================================
// CONTROLLER
// ============================================================================

#[test]
fn test_controller_returns_to_idle() {
    let ctx = context_with_label(3);
    let mut controller = PredictController::new(&ctx);
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(controller.last_prediction().is_none());

    let shown = controller.trigger(&SensorReadings::default()).unwrap().display();
    assert_eq!(shown, "Offshore Fire");
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(
        controller.last_prediction().map(|p| p.fire_type),
        Some(FireType::OffshoreFire)
    );
}

#[test]
fn test_controller_returns_to_idle_after_failure() {
    let ctx = AppContext::new(Box::new(StandardScaler::identity()), Box::new(FailingClassifier));
    let mut controller = PredictController::new(&ctx);

    assert!(controller.trigger(&SensorReadings::default()).is_err());
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(controller.last_prediction().is_none());
}

// ============================================================================
// ARTIFACT LOADING
// ============================================================================

#[test]
fn test_load_missing_scaler_is_fatal() {
    let dir = tempdir().unwrap();
    let config = ArtifactConfig::default()
        .with_model(dir.path().join("model.onnx"))
        .with_scaler(dir.path().join("scaler.json"));

    let err = match AppContext::load(&config) {
        Err(e) => e,
        Ok(_) => panic!("load should fail without artifacts"),
    };
    assert!(matches!(err, ClassifierError::ArtifactMissing(ref p) if p.ends_with("scaler.json")));
}

#[test]
fn test_load_missing_model_is_fatal() {
    let dir = tempdir().unwrap();
    let scaler_path = dir.path().join("scaler.json");
    fs::write(
        &scaler_path,
        r#"{"mean": [0, 0, 0, 0, 0, 0], "scale": [1, 1, 1, 1, 1, 1]}"#,
    )
    .unwrap();

    let config = ArtifactConfig::default()
        .with_model(dir.path().join("model.onnx"))
        .with_scaler(&scaler_path);

    let err = match AppContext::load(&config) {
        Err(e) => e,
        Ok(_) => panic!("load should fail without a model"),
    };
    assert!(matches!(err, ClassifierError::ArtifactMissing(ref p) if p.ends_with("model.onnx")));
}

#[test]
fn test_load_checksum_mismatch_is_fatal() {
    let dir = tempdir().unwrap();
    let model_path = dir.path().join("model.onnx");
    let scaler_path = dir.path().join("scaler.json");
    let manifest_path = dir.path().join("manifest.json");

    fs::write(&model_path, b"not really a model").unwrap();
    fs::write(
        &scaler_path,
        r#"{"mean": [0, 0, 0, 0, 0, 0], "scale": [1, 1, 1, 1, 1, 1]}"#,
    )
    .unwrap();
    fs::write(
        &manifest_path,
        r#"{"model_sha256": "00", "scaler_sha256": "00"}"#,
    )
    .unwrap();

    let config = ArtifactConfig::default()
        .with_model(&model_path)
        .with_scaler(&scaler_path)
        .with_manifest(&manifest_path);

    let err = match AppContext::load(&config) {
        Err(e) => e,
        Ok(_) => panic!("manifest mismatch should stop loading"),
    };
    assert!(matches!(err, ClassifierError::ChecksumMismatch { .. }));
}

#[test]
fn test_load_scores_model_maps_columns_through_scaler_classes() {
    let dir = tempdir().unwrap();
    let scaler_path = dir.path().join("scaler.json");
    fs::write(
        &scaler_path,
        r#"{"mean": [300, 0, 0, 0, 0, 0], "scale": [1, 1, 1, 1, 1, 1], "classes": [0, 2, 3, 4, 5, 6]}"#,
    )
    .unwrap();

    let model_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("scores_only.onnx");
    let config = ArtifactConfig::default()
        .with_model(model_path)
        .with_scaler(&scaler_path);

    let ctx = match AppContext::load(&config) {
        Ok(ctx) => ctx,
        Err(e) => panic!("fixture artifacts should load: {}", e),
    };

    // scaled = [0, 290, 15, 1, 1, 1]: column 1 wins, which is class 2
    let prediction = ctx.classify(&SensorReadings::default()).unwrap();
    assert_eq!(prediction.label, 2);
    assert_eq!(prediction.display(), "Other Static Land Source");
}
