use super::jobs::{JobMessage, PredictionJobResult};
use super::*;
use crate::egui_app::state::{SessionResults, SessionState};
use crate::estimator::api::{parse_prediction_response, PredictError};

fn controller() -> EstimatorController {
    let mut controller = EstimatorController::new();
    // Unroutable endpoint; tests never wait on real network traffic.
    controller.set_predict_endpoint("http://127.0.0.1:9/predict");
    controller
}

/// Put the session into Loading without spawning a worker.
fn force_loading(controller: &mut EstimatorController) -> u64 {
    let request_id = controller.jobs.next_request_id();
    controller.jobs.set_active_request(request_id);
    controller.ui.session = SessionState::Loading;
    request_id
}

fn inject_result(
    controller: &mut EstimatorController,
    request_id: u64,
    result: Result<crate::estimator::api::PredictionResponse, PredictError>,
) {
    let snapshot = controller.inputs.clone();
    controller
        .jobs
        .message_sender()
        .send(JobMessage::PredictionFinished(PredictionJobResult {
            request_id,
            snapshot,
            result,
        }))
        .expect("send job message");
    controller.poll_background_jobs();
}

fn sample_response() -> crate::estimator::api::PredictionResponse {
    parse_prediction_response(
        r#"{
            "predictions": { "Number of Users": 500, "Estimated Effort (man days)": 1234.6 },
            "reports": [
                { "target": "Estimated Effort (man days)", "model_name": "RF",
                  "r2_mean": 0.812, "mae_mean": 45.3 }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn submit_without_input_stays_idle() {
    let mut controller = controller();
    controller.submit();
    assert_eq!(controller.ui.session, SessionState::Idle);
    assert_eq!(controller.jobs.active_request(), None);
}

#[test]
fn submit_enters_loading_and_blocks_reentry() {
    let mut controller = controller();
    controller.set_field(CanonicalField::NumberOfUsers, "500");
    controller.submit();
    assert!(controller.ui.session.is_loading());
    let active = controller.jobs.active_request();
    assert!(active.is_some());

    controller.submit();
    assert!(controller.ui.session.is_loading());
    assert_eq!(controller.jobs.active_request(), active);
}

#[test]
fn inputs_stay_editable_while_loading() {
    let mut controller = controller();
    controller.set_field(CanonicalField::NumberOfUsers, "500");
    force_loading(&mut controller);
    controller.set_field(CanonicalField::DurationMonths, "12");
    assert_eq!(controller.input_text(CanonicalField::DurationMonths), "12");
    assert!(controller.ui.session.is_loading());
}

#[test]
fn reset_returns_to_idle_from_every_state() {
    let mut controller = controller();

    controller.set_field(CanonicalField::NumberOfUsers, "500");
    controller.reset();
    assert_eq!(controller.ui.session, SessionState::Idle);
    assert!(!controller.has_any_input());

    controller.set_field(CanonicalField::NumberOfUsers, "500");
    force_loading(&mut controller);
    controller.reset();
    assert_eq!(controller.ui.session, SessionState::Idle);
    assert!(!controller.has_any_input());

    controller.ui.session = SessionState::Success(SessionResults {
        snapshot: controller.inputs.clone(),
        response: sample_response(),
    });
    controller.reset();
    assert_eq!(controller.ui.session, SessionState::Idle);

    controller.ui.session = SessionState::Error(SUBMISSION_ERROR_MESSAGE.to_string());
    controller.reset();
    assert_eq!(controller.ui.session, SessionState::Idle);
}

#[test]
fn success_result_applies_response_and_requests_scroll() {
    let mut controller = controller();
    controller.set_field(CanonicalField::NumberOfUsers, "500");
    let request_id = force_loading(&mut controller);

    inject_result(&mut controller, request_id, Ok(sample_response()));

    let SessionState::Success(results) = &controller.ui.session else {
        panic!("expected Success, got {:?}", controller.ui.session);
    };
    assert_eq!(results.response, sample_response());
    assert!(results.snapshot.contains_wire_name("Number of Users"));
    assert!(controller.ui.scroll_to_results);
    assert_eq!(controller.jobs.active_request(), None);
}

#[test]
fn failure_maps_to_fixed_message_and_keeps_inputs() {
    let mut controller = controller();
    controller.set_field(CanonicalField::NumberOfUsers, "500");
    let request_id = force_loading(&mut controller);

    inject_result(
        &mut controller,
        request_id,
        Err(PredictError::Transport("connection refused".into())),
    );

    assert_eq!(
        controller.ui.session,
        SessionState::Error(SUBMISSION_ERROR_MESSAGE.to_string())
    );
    assert_eq!(controller.input_text(CanonicalField::NumberOfUsers), "500");
}

#[test]
fn result_arriving_after_reset_is_discarded() {
    let mut controller = controller();
    controller.set_field(CanonicalField::NumberOfUsers, "500");
    let request_id = force_loading(&mut controller);
    controller.reset();

    inject_result(&mut controller, request_id, Ok(sample_response()));

    assert_eq!(controller.ui.session, SessionState::Idle);
    assert!(!controller.ui.scroll_to_results);
}

#[test]
fn newer_submission_supersedes_an_older_result() {
    let mut controller = controller();
    controller.set_field(CanonicalField::NumberOfUsers, "500");
    let first = force_loading(&mut controller);
    let second = force_loading(&mut controller);

    inject_result(
        &mut controller,
        first,
        Err(PredictError::Transport("timed out".into())),
    );
    assert!(controller.ui.session.is_loading());

    inject_result(&mut controller, second, Ok(sample_response()));
    assert!(matches!(controller.ui.session, SessionState::Success(_)));
}
