//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema the artifacts were fit against.**
//!
//! ## Rules
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Reordering without re-fitting the scaler and classifier produces wrong
//! predictions with no error, so a scaler that embeds names or a layout
//! hash is checked against this table at load time.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "brightness",      // 0: Brightness temperature of the fire pixel (K)
    "bright_t31",      // 1: Brightness temperature, channel 31 (K)
    "frp",             // 2: Fire Radiative Power (MW)
    "scan",            // 3: Along-scan pixel size (km)
    "track",           // 4: Along-track pixel size (km)
    "confidence",      // 5: Ordinal confidence code (low=0, nominal=1, high=2)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 6;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of the version byte followed by every name, NUL-separated
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Check an artifact's feature names against the layout, position by position.
///
/// Returns a description of the first difference.
pub fn check_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), String> {
    if names.len() != FEATURE_COUNT {
        return Err(format!(
            "expected {} features, artifact declares {}",
            FEATURE_COUNT,
            names.len()
        ));
    }

    for (i, (expected, actual)) in FEATURE_LAYOUT.iter().zip(names).enumerate() {
        if *expected != actual.as_ref() {
            return Err(format!(
                "feature {} should be '{}', artifact has '{}'",
                i,
                expected,
                actual.as_ref()
            ));
        }
    }

    Ok(())
}

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================
