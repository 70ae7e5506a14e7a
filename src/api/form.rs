//! Terminal Form - the interactive surface.
//!
//! Reads one command per line, edits the current readings, and runs the
//! pipeline only on `predict`. Presentation only: all classification goes
//! through `PredictController`.

use std::io::{BufRead, Write};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::error::ClassifierError;
use crate::logic::controller::PredictController;
use crate::logic::features::{ConfidenceLevel, SensorReadings};

use super::commands::{FormCommand, FIELDS};

pub const TITLE: &str = "🔥 Fire Type Classification";

pub const SUBTITLE: &str = "This application leverages a machine learning model to predict the type of fire \
based on real-time MODIS satellite sensor readings. Input the following parameters to classify the fire event.";

pub const SECTION: &str = "MODIS Satellite Readings";

const RULE: &str = "---";

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Drive the form until `quit` or end of input.
///
/// Rejected input is reported and the session continues; a classifier
/// failure ends it.
pub fn run<R: BufRead, W: Write>(
    controller: &mut PredictController<'_>,
    input: R,
    mut output: W,
) -> Result<(), FormError> {
    let mut readings = SensorReadings::default();

    render_header(&mut output)?;
    render_form(&mut output, &readings)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;

        match line.parse::<FormCommand>() {
            Ok(FormCommand::Quit) => break,
            Ok(FormCommand::Show) => render_form(&mut output, &readings)?,
            Ok(FormCommand::Help) => render_help(&mut output)?,
            Ok(FormCommand::Reset) => {
                readings = SensorReadings::default();
                render_form(&mut output, &readings)?;
            }
            Ok(FormCommand::Set(value)) => {
                value.apply(&mut readings);
                log::debug!("Field updated: {:?}", value);
            }
            Ok(FormCommand::Status) => {
                let status = controller.context().status();
                writeln!(output, "Model:       {}", status.model_name)?;
                writeln!(output, "Scaler:      {}", status.scaler_name)?;
                writeln!(
                    output,
                    "Layout:      v{} ({:08x})",
                    status.layout.version, status.layout.hash
                )?;
                writeln!(output, "Features:    {}", status.layout.feature_names.join(", "))?;
                writeln!(
                    output,
                    "Predictions: {} (avg {:.3} ms)",
                    status.prediction_count, status.avg_latency_ms
                )?;
            }
            Ok(FormCommand::Predict) => {
                writeln!(output, "Analyzing...")?;
                output.flush()?;

                let prediction = controller.trigger(&readings)?;
                writeln!(output, "Predicted Fire Type: {}", prediction.display())?;
            }
            Err(e) => writeln!(output, "! {}", e)?,
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

fn render_header<W: Write>(output: &mut W) -> std::io::Result<()> {
    writeln!(output, "{}", TITLE)?;
    writeln!(output, "{}", SUBTITLE)?;
    writeln!(output, "{}", RULE)?;
    writeln!(output, "({} v{})", APP_NAME, APP_VERSION)
}

pub fn render_form<W: Write>(output: &mut W, readings: &SensorReadings) -> std::io::Result<()> {
    writeln!(output, "{}", SECTION)?;

    for spec in FIELDS.iter() {
        let value = match spec.name {
            "brightness" => readings.brightness.to_string(),
            "bright_t31" => readings.bright_t31.to_string(),
            "frp" => readings.frp.to_string(),
            "scan" => readings.scan.to_string(),
            "track" => readings.track.to_string(),
            _ => format!("{} [{}]", readings.confidence, confidence_choices()),
        };
        writeln!(output, "  {:<11} {:<26} {}", spec.name, spec.label, value)?;
    }

    writeln!(output, "{}", RULE)?;
    writeln!(output, "Type 'predict' to classify, 'help' for commands.")
}

fn render_help<W: Write>(output: &mut W) -> std::io::Result<()> {
    writeln!(output, "Commands:")?;
    writeln!(output, "  <field> <value>   set a field (also <field>=<value>)")?;
    writeln!(output, "  predict           Predict Fire Type")?;
    writeln!(output, "  reset             restore default readings")?;
    writeln!(output, "  status            engine status")?;
    writeln!(output, "  quit              leave")?;
    writeln!(output, "Fields:")?;
    for spec in FIELDS.iter() {
        writeln!(output, "  {:<11} {}", spec.name, spec.help)?;
    }
    Ok(())
}

fn confidence_choices() -> String {
    ConfidenceLevel::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::logic::features::{ScaledFeatureVector, FEATURE_COUNT};
    use crate::logic::model::{Classifier, PredictedLabel, StandardScaler};
    use crate::logic::pipeline::AppContext;
    use crate::logic::ControllerState;
    use std::io::Cursor;

    /// Label from the raw confidence code: low → 0, nominal → 1, high → 2
    struct ConfidenceEcho;

    impl Classifier for ConfidenceEcho {
        fn predict(&self, batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
            Ok(batch
                .iter()
                .map(|v| v.values[FEATURE_COUNT - 1] as PredictedLabel)
                .collect())
        }
    }

    struct Broken;

    impl Classifier for Broken {
        fn predict(&self, _batch: &[ScaledFeatureVector]) -> Result<Vec<PredictedLabel>> {
            Err(ClassifierError::Inference("boom".to_string()))
        }
    }

    fn context(classifier: Box<dyn Classifier>) -> AppContext {
        AppContext::new(Box::new(StandardScaler::identity()), classifier)
    }

    fn session(ctx: &AppContext, script: &str) -> (std::result::Result<(), FormError>, String) {
        let mut controller = PredictController::new(ctx);
        let mut out = Vec::new();
        let result = run(&mut controller, Cursor::new(script.to_string()), &mut out);
        assert_eq!(controller.state(), ControllerState::Idle);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_form_shows_defaults() {
        let ctx = context(Box::new(ConfidenceEcho));
        let (result, out) = session(&ctx, "quit\n");

        assert!(result.is_ok());
        assert!(out.contains(TITLE));
        assert!(out.contains(SECTION));
        assert!(out.contains("Brightness (Kelvin)"));
        assert!(out.contains("300"));
        assert!(out.contains("nominal [low | nominal | high]"));
        assert!(!out.contains("Predicted Fire Type"));
    }

    #[test]
    fn test_predict_only_on_trigger() {
        let ctx = context(Box::new(ConfidenceEcho));
        let (_, out) = session(&ctx, "frp 20\nconfidence low\nbrightness=310\n");

        assert!(!out.contains("Analyzing..."));
        assert_eq!(ctx.status().prediction_count, 0);
    }

    #[test]
    fn test_predict_displays_label() {
        let ctx = context(Box::new(ConfidenceEcho));
        let (result, out) = session(&ctx, "confidence low\npredict\nconfidence nominal\npredict\n");

        assert!(result.is_ok());
        assert!(out.contains("Analyzing..."));
        assert!(out.contains("Predicted Fire Type: Vegetation Fire"));
        assert!(out.contains("Predicted Fire Type: Unknown"));
        assert_eq!(ctx.status().prediction_count, 2);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let ctx = context(Box::new(ConfidenceEcho));
        let (_, out) = session(&ctx, "confidence high\npredict\nreset\npredict\n");

        let results: Vec<_> = out
            .lines()
            .filter_map(|l| l.split("Predicted Fire Type: ").nth(1))
            .collect();
        assert_eq!(results, vec!["Other Static Land Source", "Unknown"]);
    }

    #[test]
    fn test_bad_input_is_reported_and_session_continues() {
        let ctx = context(Box::new(ConfidenceEcho));
        let (result, out) = session(&ctx, "frp lots\nconfidence extreme\npredict\n");

        assert!(result.is_ok());
        assert!(out.contains("! 'lots' is not a number for 'frp'"));
        assert!(out.contains("! unknown confidence level 'extreme'"));
        assert!(out.contains("Predicted Fire Type: Unknown"));
    }

    #[test]
    fn test_classifier_failure_ends_session() {
        let ctx = context(Box::new(Broken));
        let (result, out) = session(&ctx, "predict\npredict\n");

        assert!(matches!(result, Err(FormError::Classifier(_))));
        assert_eq!(out.matches("Analyzing...").count(), 1);
    }

    #[test]
    fn test_status_and_help() {
        let ctx = context(Box::new(ConfidenceEcho)).with_names("m.onnx", "s.json");
        let (_, out) = session(&ctx, "status\nhelp\n");

        assert!(out.contains("Model:       m.onnx"));
        assert!(out.contains("Predictions: 0"));
        assert!(out.contains("Features:    brightness, bright_t31, frp, scan, track, confidence"));
        assert!(out.contains("Fire Radiative Power in megawatts."));
    }
}
