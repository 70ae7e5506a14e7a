//! Fire Type - display labels for classifier output.
//!
//! Only labels 0, 2 and 3 have a display name. Label 1 was never mapped
//! and any other value shares the same `Unknown` fallback; resolution never
//! fails and is not logged as a warning.

use serde::{Deserialize, Serialize};

use crate::logic::model::PredictedLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireType {
    VegetationFire,
    OtherStaticLandSource,
    OffshoreFire,
    Unknown,
}

impl FireType {
    /// Total over every label
    pub fn from_label(label: PredictedLabel) -> Self {
        match label {
            0 => FireType::VegetationFire,
            2 => FireType::OtherStaticLandSource,
            3 => FireType::OffshoreFire,
            _ => FireType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FireType::VegetationFire => "Vegetation Fire",
            FireType::OtherStaticLandSource => "Other Static Land Source",
            FireType::OffshoreFire => "Offshore Fire",
            FireType::Unknown => "Unknown",
        }
    }
}

impl From<PredictedLabel> for FireType {
    fn from(label: PredictedLabel) -> Self {
        Self::from_label(label)
    }
}

impl std::fmt::Display for FireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label → display string
pub fn resolve(label: PredictedLabel) -> &'static str {
    FireType::from_label(label).as_str()
}
