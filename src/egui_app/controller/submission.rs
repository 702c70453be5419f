//! Submission and reset operations on the session state machine.

use super::jobs::{PredictionJob, PredictionJobResult};
use super::EstimatorController;
use crate::egui_app::state::{SessionResults, SessionState};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model::{self, EffortReliability};

/// Fixed advisory shown for every failed submission. The underlying cause is
/// logged, never surfaced.
pub const SUBMISSION_ERROR_MESSAGE: &str =
    "Unable to contact the prediction service. Please check that the backend is running.";

impl EstimatorController {
    /// Submit the current inputs to the prediction service.
    ///
    /// No-op while a request is in flight or when no field has a value. The
    /// request carries a snapshot of the inputs taken now; later edits apply
    /// only to the next submission.
    pub fn submit(&mut self) {
        if self.ui.session.is_loading() {
            return;
        }
        if !self.inputs.has_any_input() {
            return;
        }

        let snapshot = self.inputs.clone();
        let request_id = self.jobs.next_request_id();
        self.jobs.set_active_request(request_id);
        self.ui.session = SessionState::Loading;
        self.set_status("Requesting estimates from the model service", StatusTone::Busy);
        tracing::info!(request_id, fields = snapshot.len(), "Submitting prediction request");
        self.jobs.begin_prediction(PredictionJob {
            request_id,
            endpoint: self.predict_endpoint.clone(),
            inputs: snapshot.wire_map(),
            snapshot,
        });
    }

    /// Return the whole session to its initial state.
    ///
    /// Always succeeds from any state. Clearing the active request id makes a
    /// still-in-flight response stale, so it will be discarded on arrival.
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.jobs.clear_active_request();
        self.ui.session = SessionState::Idle;
        self.ui.scroll_to_results = false;
        self.set_idle_status();
    }

    pub(super) fn apply_prediction_result(&mut self, message: PredictionJobResult) {
        if self.jobs.active_request() != Some(message.request_id) {
            tracing::debug!(
                request_id = message.request_id,
                "Discarding stale prediction result"
            );
            return;
        }
        self.jobs.clear_active_request();

        match message.result {
            Ok(response) => {
                tracing::info!(
                    request_id = message.request_id,
                    predictions = response.predictions.len(),
                    reports = response.reports.len(),
                    "Prediction request succeeded"
                );
                if let EffortReliability::Ambiguous(count) =
                    view_model::effort_reliability(&response)
                {
                    tracing::warn!(count, "Multiple reliability reports target the effort field");
                }
                self.ui.session = SessionState::Success(SessionResults {
                    snapshot: message.snapshot,
                    response,
                });
                self.ui.scroll_to_results = true;
                self.set_status("Estimates ready", StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!(
                    request_id = message.request_id,
                    error = %err,
                    "Prediction request failed"
                );
                self.ui.session = SessionState::Error(SUBMISSION_ERROR_MESSAGE.to_string());
                self.set_status("Prediction request failed", StatusTone::Error);
            }
        }
    }
}
