//! Form Commands - parsing of one line of user input.

use crate::logic::features::{ConfidenceLevel, SensorReadings, UnknownConfidence};

// ============================================================================
// FIELDS
// ============================================================================

/// One input on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub help: &'static str,
}

/// Form fields, in display order
pub const FIELDS: [FieldSpec; 6] = [
    FieldSpec {
        name: "brightness",
        label: "Brightness (Kelvin)",
        help: "Brightness temperature of the fire pixel in Kelvin.",
    },
    FieldSpec {
        name: "bright_t31",
        label: "Brightness T31 (Kelvin)",
        help: "Brightness temperature of the fire pixel in the T31 channel (Kelvin).",
    },
    FieldSpec {
        name: "frp",
        label: "Fire Radiative Power (MW)",
        help: "Fire Radiative Power in megawatts.",
    },
    FieldSpec {
        name: "scan",
        label: "Scan (km)",
        help: "The scan angle of the satellite.",
    },
    FieldSpec {
        name: "track",
        label: "Track (km)",
        help: "The track of the satellite.",
    },
    FieldSpec {
        name: "confidence",
        label: "Confidence Level",
        help: "The confidence level of the fire detection.",
    },
];

pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

// ============================================================================
// ERRORS
// ============================================================================

/// Rejected input. The form reports it and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormInputError {
    #[error("unknown command '{0}' (type 'help' for the list)")]
    UnknownCommand(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("missing value for '{0}'")]
    MissingValue(String),

    #[error("'{value}' is not a number for '{field}'")]
    NotANumber { field: String, value: String },

    #[error(transparent)]
    Confidence(#[from] UnknownConfidence),
}

// ============================================================================
// COMMANDS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    /// Redraw the form
    Show,
    Set(FieldValue),
    Predict,
    Reset,
    Status,
    Help,
    Quit,
}

/// A typed value for one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Brightness(f64),
    BrightT31(f64),
    Frp(f64),
    Scan(f64),
    Track(f64),
    Confidence(ConfidenceLevel),
}

impl FieldValue {
    /// Parse `value` for the named field
    pub fn parse(name: &str, value: &str) -> Result<Self, FormInputError> {
        let spec = field(name).ok_or_else(|| FormInputError::UnknownField(name.to_string()))?;

        if spec.name == "confidence" {
            return Ok(FieldValue::Confidence(value.parse()?));
        }

        let number = parse_number(spec.name, value)?;
        Ok(match spec.name {
            "brightness" => FieldValue::Brightness(number),
            "bright_t31" => FieldValue::BrightT31(number),
            "frp" => FieldValue::Frp(number),
            "scan" => FieldValue::Scan(number),
            "track" => FieldValue::Track(number),
            other => return Err(FormInputError::UnknownField(other.to_string())),
        })
    }

    pub fn apply(&self, readings: &mut SensorReadings) {
        match *self {
            FieldValue::Brightness(v) => readings.brightness = v,
            FieldValue::BrightT31(v) => readings.bright_t31 = v,
            FieldValue::Frp(v) => readings.frp = v,
            FieldValue::Scan(v) => readings.scan = v,
            FieldValue::Track(v) => readings.track = v,
            FieldValue::Confidence(c) => readings.confidence = c,
        }
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, FormInputError> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FormInputError::NotANumber {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

impl std::str::FromStr for FormCommand {
    type Err = FormInputError;

    /// `<field> <value>` or `<field>=<value>` sets a field; anything else is
    /// a keyword.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        let (head, rest) = match line.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => match line.split_once(char::is_whitespace) {
                Some((name, value)) => (name, Some(value.trim())),
                None => (line, None),
            },
        };

        match (head, rest) {
            ("", None) => Ok(FormCommand::Show),
            ("predict", None) => Ok(FormCommand::Predict),
            ("reset", None) => Ok(FormCommand::Reset),
            ("status", None) => Ok(FormCommand::Status),
            ("help" | "?", None) => Ok(FormCommand::Help),
            ("quit" | "exit", None) => Ok(FormCommand::Quit),
            ("predict" | "reset" | "status" | "help" | "?" | "quit" | "exit", Some(_)) => {
                Err(FormInputError::UnknownCommand(line.to_string()))
            }
            (name, value) if field(name).is_some() => match value {
                Some(v) if !v.is_empty() => Ok(FormCommand::Set(FieldValue::parse(name, v)?)),
                _ => Err(FormInputError::MissingValue(name.to_string())),
            },
            (name, Some(_)) if !name.is_empty() => Err(FormInputError::UnknownField(name.to_string())),
            _ => Err(FormInputError::UnknownCommand(line.to_string())),
        }
    }
}
