//! Interaction Controller
//!
//! Gates the pipeline behind an explicit trigger. Idle → Predicting → Idle,
//! whether the run succeeds or fails. `trigger` takes `&mut self`, so one
//! run finishes before the next can start.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logic::features::SensorReadings;
use crate::logic::pipeline::{AppContext, Prediction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    Idle,
    Predicting,
}

pub struct PredictController<'a> {
    context: &'a AppContext,
    state: ControllerState,
    last: Option<Prediction>,
}

impl<'a> PredictController<'a> {
    pub fn new(context: &'a AppContext) -> Self {
        Self {
            context,
            state: ControllerState::Idle,
            last: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn context(&self) -> &AppContext {
        self.context
    }

    /// Most recent successful prediction
    pub fn last_prediction(&self) -> Option<&Prediction> {
        self.last.as_ref()
    }

    /// Run the pipeline once with the given readings
    pub fn trigger(&mut self, readings: &SensorReadings) -> Result<&Prediction> {
        self.state = ControllerState::Predicting;
        let outcome = self.context.classify(readings);
        self.state = ControllerState::Idle;

        let prediction: &Prediction = self.last.insert(outcome?);
        Ok(prediction)
    }
}
