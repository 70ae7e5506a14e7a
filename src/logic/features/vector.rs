//! Feature Vector - Core data structure for ML input
//!
//! `SensorReadings` is what the form collects. `assemble` flattens it into
//! a `FeatureVector` in `FEATURE_LAYOUT` order; `ScaledFeatureVector` is
//! what comes out of the scaler. Both vectors are fixed-size arrays so a
//! length mismatch cannot reach the classifier. Values stay `f64` until
//! the classifier builds its input tensor.

use serde::{Deserialize, Serialize};

use super::confidence::ConfidenceLevel;
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::constants::{
    DEFAULT_BRIGHTNESS, DEFAULT_BRIGHT_T31, DEFAULT_FRP, DEFAULT_SCAN, DEFAULT_TRACK,
};

// ============================================================================
// SENSOR READINGS
// ============================================================================

/// One set of MODIS readings for a fire pixel.
///
/// No range checks: physically implausible values pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReadings {
    /// Brightness temperature (Kelvin)
    pub brightness: f64,
    /// Brightness temperature, channel 31 (Kelvin)
    pub bright_t31: f64,
    /// Fire Radiative Power (MW)
    pub frp: f64,
    pub scan: f64,
    pub track: f64,
    pub confidence: ConfidenceLevel,
}

impl Default for SensorReadings {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            bright_t31: DEFAULT_BRIGHT_T31,
            frp: DEFAULT_FRP,
            scan: DEFAULT_SCAN,
            track: DEFAULT_TRACK,
            confidence: ConfidenceLevel::default(),
        }
    }
}

// ============================================================================
// FEATURE VECTORS
// ============================================================================

/// Raw feature values in layout order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// JSON form with names attached, for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        named_values(&self.values)
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

impl From<&SensorReadings> for FeatureVector {
    fn from(readings: &SensorReadings) -> Self {
        assemble(readings)
    }
}

/// Feature values after the scaler's affine transform. Same order, unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl ScaledFeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_log_entry(&self) -> serde_json::Value {
        named_values(&self.values)
    }
}

fn named_values(values: &[f64; FEATURE_COUNT]) -> serde_json::Value {
    let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
        .iter()
        .zip(values.iter())
        .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
        .collect();
    serde_json::Value::Object(named)
}

// ============================================================================
// ASSEMBLER
// ============================================================================

/// Flatten readings into layout order:
/// `[brightness, bright_t31, frp, scan, track, confidence_code]`
pub fn assemble(readings: &SensorReadings) -> FeatureVector {
    FeatureVector::from_values([
        readings.brightness,
        readings.bright_t31,
        readings.frp,
        readings.scan,
        readings.track,
        readings.confidence.as_feature(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_readings_assemble() {
        let vector = assemble(&SensorReadings::default());
        assert_eq!(vector.values, [300.0, 290.0, 15.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_to_log_entry_names_every_feature() {
        let entry = assemble(&SensorReadings::default()).to_log_entry();
        for name in FEATURE_LAYOUT {
            assert!(entry.get(*name).is_some(), "missing {}", name);
        }
        assert_eq!(entry["frp"], 15.0);
    }

    #[test]
    fn test_from_readings_matches_assemble() {
        let readings = SensorReadings {
            confidence: ConfidenceLevel::High,
            ..Default::default()
        };
        assert_eq!(FeatureVector::from(&readings), assemble(&readings));
    }
}
