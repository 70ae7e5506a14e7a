//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Artifact locations can be overridden from the environment.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Fire Type Classifier";

/// Default classifier artifact (ONNX export of the trained model)
pub const DEFAULT_MODEL_PATH: &str = "best_fire_detection_model.onnx";

/// Default scaler artifact (fitted mean/scale as JSON)
pub const DEFAULT_SCALER_PATH: &str = "scaler.json";

pub const ENV_MODEL_PATH: &str = "FIRE_MODEL_PATH";
pub const ENV_SCALER_PATH: &str = "FIRE_SCALER_PATH";
pub const ENV_ARTIFACT_MANIFEST: &str = "FIRE_ARTIFACT_MANIFEST";

// ============================================
// Form defaults
// ============================================

pub const DEFAULT_BRIGHTNESS: f64 = 300.0;
pub const DEFAULT_BRIGHT_T31: f64 = 290.0;
pub const DEFAULT_FRP: f64 = 15.0;
pub const DEFAULT_SCAN: f64 = 1.0;
pub const DEFAULT_TRACK: f64 = 1.0;

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get classifier model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var(ENV_MODEL_PATH)
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get scaler path from environment or use default
pub fn get_scaler_path() -> String {
    std::env::var(ENV_SCALER_PATH)
        .unwrap_or_else(|_| DEFAULT_SCALER_PATH.to_string())
}

/// Get artifact manifest path, if one is configured
pub fn get_manifest_path() -> Option<String> {
    std::env::var(ENV_ARTIFACT_MANIFEST)
        .ok()
        .filter(|s| !s.trim().is_empty())
}
