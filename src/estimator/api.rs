//! Client for the prediction service's `/predict` endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http_client;

/// Training rows in the service's fixed train/test split.
pub const TRAIN_SPLIT_ROWS: usize = 8;
/// Held-out test rows in the service's fixed train/test split.
pub const TEST_SPLIT_ROWS: usize = 5;

const MAX_PREDICT_RESPONSE_BYTES: usize = 256 * 1024;

/// Request body: only user-supplied fields, as entered.
#[derive(Clone, Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub inputs: &'a BTreeMap<String, String>,
}

/// Parsed response from a successful prediction call.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PredictionResponse {
    /// Estimates keyed by field name; covers estimated and echoed fields.
    /// Values the service could not produce arrive as JSON null.
    pub predictions: BTreeMap<String, serde_json::Value>,
    /// Per-target reliability records, in service order.
    #[serde(default)]
    pub reports: Vec<ReliabilityReport>,
}

/// Held-out reliability figures for one predicted target.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ReliabilityReport {
    pub target: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub r2_mean: Option<f64>,
    #[serde(default)]
    pub mae_mean: Option<f64>,
}

/// Errors from one prediction attempt. All collapse to the same advisory
/// message in the UI; the detail is kept for logging.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("HTTP {0}: {1}")]
    Status(u16, String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("JSON error: {0}")]
    Json(String),
}

/// Post the supplied inputs to `endpoint` and parse the response.
///
/// Blocking; intended to run on a worker thread. No retries — a failure is
/// terminal for this attempt.
pub fn request_predictions(
    endpoint: &str,
    inputs: &BTreeMap<String, String>,
) -> Result<PredictionResponse, PredictError> {
    let request = PredictRequest { inputs };
    let response = match http_client::agent()
        .post(endpoint)
        .set("Accept", "application/json")
        .send_json(&request)
    {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = read_body_limited(response).unwrap_or_else(|err| err);
            return Err(PredictError::Status(code, body));
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(PredictError::Transport(err.to_string()));
        }
    };

    let body = read_body_limited(response).map_err(PredictError::Json)?;
    parse_prediction_response(&body)
}

fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    http_client::read_response_bytes(response, MAX_PREDICT_RESPONSE_BYTES)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|err| err.to_string())
}

/// Parse a response body against the service contract.
pub fn parse_prediction_response(body: &str) -> Result<PredictionResponse, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| PredictError::Json(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_predictions_and_reports() {
        let body = r#"{
            "predictions": {
                "Number of Users": 500,
                "Estimated Effort (man days)": 1234.6
            },
            "reports": [
                {
                    "target": "Estimated Effort (man days)",
                    "model_name": "RF",
                    "r2_mean": 0.812,
                    "mae_mean": 45.3
                }
            ]
        }"#;
        let parsed = parse_prediction_response(body).unwrap();
        assert_eq!(parsed.predictions.len(), 2);
        assert_eq!(parsed.reports.len(), 1);
        let report = &parsed.reports[0];
        assert_eq!(report.target, "Estimated Effort (man days)");
        assert_eq!(report.model_name, "RF");
        assert_eq!(report.r2_mean, Some(0.812));
        assert_eq!(report.mae_mean, Some(45.3));
    }

    #[test]
    fn null_figures_parse_as_absent() {
        let body = r#"{
            "predictions": { "Estimated Effort (man days)": null },
            "reports": [
                { "target": "Estimated Effort (man days)", "r2_mean": null, "mae_mean": null }
            ]
        }"#;
        let parsed = parse_prediction_response(body).unwrap();
        assert!(parsed.predictions["Estimated Effort (man days)"].is_null());
        assert_eq!(parsed.reports[0].r2_mean, None);
        assert_eq!(parsed.reports[0].mae_mean, None);
        assert_eq!(parsed.reports[0].model_name, "");
    }

    #[test]
    fn missing_reports_default_to_empty() {
        let body = r#"{ "predictions": { "RICEFW": 40 } }"#;
        let parsed = parse_prediction_response(body).unwrap();
        assert!(parsed.reports.is_empty());
    }

    #[test]
    fn missing_predictions_is_a_parse_error() {
        let err = parse_prediction_response(r#"{ "reports": [] }"#).unwrap_err();
        assert!(matches!(err, PredictError::Json(_)));
    }

    #[test]
    fn empty_and_malformed_bodies_are_parse_errors() {
        assert!(matches!(
            parse_prediction_response("   "),
            Err(PredictError::Json(_))
        ));
        assert!(matches!(
            parse_prediction_response("not json"),
            Err(PredictError::Json(_))
        ));
    }

    #[test]
    fn request_body_shape_matches_contract() {
        let mut inputs = BTreeMap::new();
        inputs.insert("Number of Users".to_string(), "500".to_string());
        let request = PredictRequest { inputs: &inputs };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "inputs": { "Number of Users": "500" } })
        );
    }

    #[test]
    fn split_constants_match_the_backend_contract() {
        assert_eq!(TRAIN_SPLIT_ROWS, 8);
        assert_eq!(TEST_SPLIT_ROWS, 5);
    }
}
