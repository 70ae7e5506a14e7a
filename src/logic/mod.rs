//! Logic Module - Classification pipeline
//!
//! - `features/` - Feature layout, confidence encoding, assembler
//! - `model/` - Scaler and classifier artifacts (ONNX, checksum manifest)
//! - `fire_type` - Label → display string
//! - `pipeline` - Application context, one prediction end to end
//! - `controller` - Trigger gating (Idle / Predicting)

pub mod config;
pub mod controller;
pub mod features;
pub mod fire_type;
pub mod model;
pub mod pipeline;

#[cfg(test)]
mod tests;

pub use config::ArtifactConfig;
pub use controller::{ControllerState, PredictController};
pub use fire_type::FireType;
pub use pipeline::{AppContext, EngineStatus, Prediction};
