//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the exported classifier and runs it on scaled feature vectors.
//! The classifier is batch-shaped: N vectors in, N labels out.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::logic::features::{ScaledFeatureVector, FEATURE_COUNT};

/// Integer class emitted by the classifier
pub type PredictedLabel = i64;

/// Output name used by exported scikit-learn classifiers
pub const LABEL_OUTPUT: &str = "label";

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait cho classifiers (ONNX, test doubles, ...)
pub trait Classifier: Send + Sync {
    /// One label per input vector, in input order
    fn predict(&self, batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>>;
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub input_name: String,
    pub output_name: String,
    pub features: usize,
    /// Class value per score column; `None` when the model emits labels
    pub classes: Option<Vec<PredictedLabel>>,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Classifier output as extracted from the session
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// Class values, one per row
    Labels(Vec<PredictedLabel>),
    /// Row-major `[rows, columns]` per-class scores
    Scores { data: Vec<f32>, columns: usize },
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    // Session::run needs &mut
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Load ONNX model từ file.
    ///
    /// `classes` maps score columns to class values. It is required when
    /// the model has no `label` output, since a column index is not a
    /// class value.
    pub fn load(model_path: impl AsRef<Path>, classes: Option<Vec<PredictedLabel>>) -> Result<Self> {
        let model_path = model_path.as_ref();
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ClassifierError::ArtifactMissing(model_path.to_path_buf()));
        }

        let load_error = |reason: String| ClassifierError::malformed(model_path, reason);

        let session = Session::builder()
            .map_err(|e| load_error(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_error(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| load_error(format!("Failed to load model: {}", e)))?;

        let model_name = model_path.display().to_string();

        let input = session.inputs.first().ok_or_else(|| {
            ClassifierError::SchemaMismatch(format!("model {} declares no inputs", model_name))
        })?;

        // Symbolic dimensions come back as -1; only a concrete width is checked.
        if let Some(width) = input.input_type.tensor_shape().and_then(|shape| shape.last().copied()) {
            if width > 0 && width as usize != FEATURE_COUNT {
                return Err(ClassifierError::SchemaMismatch(format!(
                    "model {} expects {} features, layout has {}",
                    model_name, width, FEATURE_COUNT
                )));
            }
        }
        let input_name = input.name.clone();

        let output_names: Vec<&str> = session.outputs.iter().map(|o| o.name.as_str()).collect();
        let output_name = select_output(&output_names, classes.as_deref())
            .map_err(|reason| ClassifierError::SchemaMismatch(format!("model {}: {}", model_name, reason)))?
            .to_string();

        log::info!(
            "ONNX model loaded successfully (input '{}', output '{}')",
            input_name,
            output_name
        );

        Ok(Self {
            session: Mutex::new(session),
            metadata: ModelMetadata {
                model_path: model_name,
                input_name,
                output_name,
                features: FEATURE_COUNT,
                classes,
                loaded_at: chrono::Utc::now(),
            },
        })
    }

    /// Get model metadata
    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn run(&self, batch: &[ScaledFeatureVector]) -> Result<RawOutput> {
        let mut input_data = Vec::with_capacity(batch.len() * FEATURE_COUNT);
        for vec in batch {
            // The exported model takes f32; this is the only narrowing.
            input_data.extend(vec.as_slice().iter().map(|&v| v as f32));
        }

        let input_array = Array2::<f32>::from_shape_vec((batch.len(), FEATURE_COUNT), input_data)
            .map_err(|e| ClassifierError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassifierError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.metadata.output_name.as_str()).ok_or_else(|| {
            ClassifierError::Inference(format!("No output '{}'", self.metadata.output_name))
        })?;

        if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
            return Ok(RawOutput::Labels(data.to_vec()));
        }

        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Extract error: {}", e)))?;
        let columns = shape.last().copied().unwrap_or(0).max(0) as usize;

        Ok(RawOutput::Scores {
            data: data.to_vec(),
            columns,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.run(batch)?;
        decode_labels(raw, self.metadata.classes.as_deref(), batch.len())
    }
}

/// Pick the output to read: `label` when the model has one, otherwise the
/// first output, which is then read as scores and needs a class list.
pub fn select_output<'a>(outputs: &[&'a str], classes: Option<&[PredictedLabel]>) -> std::result::Result<&'a str, String> {
    if let Some(name) = outputs.iter().copied().find(|&name| name == LABEL_OUTPUT) {
        return Ok(name);
    }

    let first = outputs.first().copied().ok_or_else(|| "declares no outputs".to_string())?;
    if classes.is_none() {
        return Err(format!(
            "no '{}' output and no class list to read '{}' as scores",
            LABEL_OUTPUT, first
        ));
    }
    Ok(first)
}

/// Turn raw output into one class value per input row
pub fn decode_labels(
    raw: RawOutput,
    classes: Option<&[PredictedLabel]>,
    expected: usize,
) -> Result<Vec<PredictedLabel>> {
    let labels = match raw {
        RawOutput::Labels(labels) => labels,
        RawOutput::Scores { data, columns } => {
            let classes = classes.ok_or_else(|| {
                ClassifierError::Inference("model returned scores but no class list is configured".to_string())
            })?;
            if classes.len() != columns {
                return Err(ClassifierError::Inference(format!(
                    "model returned {} score columns for {} classes",
                    columns,
                    classes.len()
                )));
            }
            argmax_rows(&data, columns)?
                .into_iter()
                .map(|column| classes[column])
                .collect()
        }
    };

    if labels.len() != expected {
        return Err(ClassifierError::Inference(format!(
            "model returned {} labels for {} inputs",
            labels.len(),
            expected
        )));
    }

    Ok(labels)
}

/// Best column per row of row-major `[rows, columns]` scores
fn argmax_rows(scores: &[f32], columns: usize) -> Result<Vec<usize>> {
    if columns == 0 || scores.len() % columns != 0 {
        return Err(ClassifierError::Inference(format!(
            "cannot split {} scores into rows of {}",
            scores.len(),
            columns
        )));
    }

    Ok(scores
        .chunks(columns)
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0usize, f32::NEG_INFINITY), |best, (i, &s)| {
                    if s > best.1 {
                        (i, s)
                    } else {
                        best
                    }
                })
                .0
        })
        .collect())
}
