//! Confidence Level - detection quality indicator from upstream processing.
//!
//! A closed, ordinal choice. The numeric pipeline only ever sees
//! `ordinal()`; that function is the single place the encoding lives.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    #[default]
    Nominal,
    High,
}

impl ConfidenceLevel {
    /// All choices, in ordinal order
    pub const ALL: [ConfidenceLevel; 3] = [
        ConfidenceLevel::Low,
        ConfidenceLevel::Nominal,
        ConfidenceLevel::High,
    ];

    /// Ordinal encoding used at training time
    pub fn ordinal(&self) -> u8 {
        match self {
            ConfidenceLevel::Low => 0,
            ConfidenceLevel::Nominal => 1,
            ConfidenceLevel::High => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Nominal => "nominal",
            ConfidenceLevel::High => "high",
        }
    }

    /// Feature value fed to the scaler
    pub fn as_feature(&self) -> f64 {
        f64::from(self.ordinal())
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text outside the three choices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown confidence level '{0}' (expected low, nominal or high)")]
pub struct UnknownConfidence(pub String);

impl std::str::FromStr for ConfidenceLevel {
    type Err = UnknownConfidence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ConfidenceLevel::Low),
            "nominal" => Ok(ConfidenceLevel::Nominal),
            "high" => Ok(ConfidenceLevel::High),
            other => Err(UnknownConfidence(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_encoding() {
        assert_eq!(ConfidenceLevel::Low.ordinal(), 0);
        assert_eq!(ConfidenceLevel::Nominal.ordinal(), 1);
        assert_eq!(ConfidenceLevel::High.ordinal(), 2);
    }

    #[test]
    fn test_all_is_in_ordinal_order() {
        for (i, level) in ConfidenceLevel::ALL.iter().enumerate() {
            assert_eq!(level.ordinal() as usize, i);
            assert_eq!(level.as_feature(), i as f64);
        }
    }

    #[test]
    fn test_default_is_nominal() {
        assert_eq!(ConfidenceLevel::default(), ConfidenceLevel::Nominal);
    }

    #[test]
    fn test_parse_closed_choice() {
        assert_eq!("low".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::Low));
        assert_eq!("nominal".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::Nominal));
        assert_eq!("high".parse::<ConfidenceLevel>(), Ok(ConfidenceLevel::High));

        assert!("medium".parse::<ConfidenceLevel>().is_err());
        assert!("HIGH".parse::<ConfidenceLevel>().is_err());
        assert!("1".parse::<ConfidenceLevel>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for level in ConfidenceLevel::ALL {
            assert_eq!(level.to_string().parse::<ConfidenceLevel>(), Ok(level));
        }
    }
}
