//! Session controller bridging the estimation domain to the egui UI.

use crate::config::{self, ConfigError};
use crate::egui_app::state::{StatusBarState, UiState};
use crate::egui_app::ui::style::{self, StatusTone};
use crate::estimator::fields::CanonicalField;
use crate::estimator::inputs::InputMap;

mod jobs;
mod submission;
#[cfg(test)]
mod tests;

pub use submission::SUBMISSION_ERROR_MESSAGE;

/// Owns the input mapping and the session state machine; the renderer reads
/// `ui` and calls the edit/submit/reset operations.
pub struct EstimatorController {
    pub ui: UiState,
    inputs: InputMap,
    predict_endpoint: String,
    jobs: jobs::ControllerJobs,
}

impl EstimatorController {
    pub fn new() -> Self {
        Self {
            ui: UiState::default(),
            inputs: InputMap::default(),
            predict_endpoint: format!("{}/predict", config::DEFAULT_SERVICE_BASE_URL),
            jobs: jobs::ControllerJobs::new(),
        }
    }

    /// Load persisted config and resolve the prediction endpoint.
    pub fn load_configuration(&mut self) -> Result<(), ConfigError> {
        let cfg = config::load_or_default()?;
        self.predict_endpoint = cfg.predict_endpoint()?;
        tracing::info!(endpoint = %self.predict_endpoint, "Prediction service configured");
        Ok(())
    }

    /// Store `raw` for `field`; an empty value removes the field.
    ///
    /// Editable in every session state — edits made while a request is in
    /// flight apply only to the next submission.
    pub fn set_field(&mut self, field: CanonicalField, raw: &str) {
        self.inputs.set_field(field, raw);
    }

    /// Current text for `field`, empty when the user has not supplied one.
    pub fn input_text(&self, field: CanonicalField) -> &str {
        self.inputs.get(field).unwrap_or("")
    }

    /// True iff at least one field has a value.
    pub fn has_any_input(&self) -> bool {
        self.inputs.has_any_input()
    }

    /// True while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.ui.session.is_loading()
    }

    /// Drain worker results and apply them through the stale-response guard.
    /// Called once per frame by the renderer.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => break,
            };
            match message {
                jobs::JobMessage::PredictionFinished(result) => {
                    self.apply_prediction_result(result);
                }
            }
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = style::status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label.to_string();
        self.ui.status.badge_color = color;
    }

    fn set_idle_status(&mut self) {
        self.ui.status = StatusBarState::idle();
    }

    #[cfg(test)]
    pub(crate) fn set_predict_endpoint(&mut self, endpoint: impl Into<String>) {
        self.predict_endpoint = endpoint.into();
    }
}

impl Default for EstimatorController {
    fn default() -> Self {
        Self::new()
    }
}
