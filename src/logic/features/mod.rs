//! Features Module - Feature Vector Assembly
//!
//! The layout table, the confidence encoding and the assembler that turns
//! form readings into the classifier's input order.

pub mod confidence;
pub mod layout;
pub mod vector;


pub use confidence::{ConfidenceLevel, UnknownConfidence};
pub use layout::{layout_hash, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::{assemble, FeatureVector, ScaledFeatureVector, SensorReadings};
