//! Pure projections from session results into egui-facing view structs.
//!
//! Provenance is computed here from the submission's input snapshot; it is
//! never stored and never taken from the service response.

use crate::estimator::api::PredictionResponse;
use crate::estimator::fields::{CanonicalField, EFFORT_TARGET};
use crate::estimator::format;
use crate::estimator::inputs::InputMap;

/// Whether a displayed value was echoed from the user or produced by the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    UserProvided,
    ModelEstimated,
}

impl Provenance {
    /// Caption shown under each value.
    pub fn label(self) -> &'static str {
        match self {
            Provenance::UserProvided => "Provided by user",
            Provenance::ModelEstimated => "Estimated by model",
        }
    }
}

/// One prediction, formatted for the cards grid and the estimation table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionRowView {
    pub field: String,
    pub value: String,
    pub provenance: Provenance,
}

/// Build display rows for every key in `predictions`.
///
/// Canonical fields come first in display order; keys outside the contract
/// follow in name order. A key is user-provided iff it was present in the
/// snapshot taken when the request was submitted.
pub fn prediction_rows(snapshot: &InputMap, response: &PredictionResponse) -> Vec<PredictionRowView> {
    let mut rows = Vec::with_capacity(response.predictions.len());
    for field in CanonicalField::ALL {
        let name = field.wire_name();
        if let Some(value) = response.predictions.get(name) {
            rows.push(build_row(snapshot, name, value));
        }
    }
    for (name, value) in &response.predictions {
        if CanonicalField::from_wire_name(name).is_none() {
            rows.push(build_row(snapshot, name, value));
        }
    }
    rows
}

fn build_row(snapshot: &InputMap, name: &str, value: &serde_json::Value) -> PredictionRowView {
    let provenance = if snapshot.contains_wire_name(name) {
        Provenance::UserProvided
    } else {
        Provenance::ModelEstimated
    };
    PredictionRowView {
        field: name.to_string(),
        value: format::format_number(format::json_number(value)),
        provenance,
    }
}

/// Outcome of selecting the effort target's reliability report.
#[derive(Clone, Debug, PartialEq)]
pub enum EffortReliability {
    /// No report targets the effort field; the panel stays hidden.
    Missing,
    /// More than one report matches; flagged instead of silently picking one.
    Ambiguous(usize),
    /// Exactly one report matches.
    Report(EffortPanelView),
}

/// Formatted figures for the reliability panel.
#[derive(Clone, Debug, PartialEq)]
pub struct EffortPanelView {
    pub target: String,
    pub model_name: String,
    /// R² as a 0..1 fraction, for the progress bar fill. Null reads as 0.
    pub r2_fraction: f32,
    /// R² as a percentage with one decimal place.
    pub reliability_percent: String,
    pub mae: String,
    /// The current predicted effort value from this response.
    pub current_estimate: String,
}

/// Select and format the reliability report for the effort target.
pub fn effort_reliability(response: &PredictionResponse) -> EffortReliability {
    let target_name = EFFORT_TARGET.wire_name();
    let mut matches = response
        .reports
        .iter()
        .filter(|report| report.target == target_name);
    let Some(report) = matches.next() else {
        return EffortReliability::Missing;
    };
    let extra = matches.count();
    if extra > 0 {
        return EffortReliability::Ambiguous(extra + 1);
    }

    let r2 = report.r2_mean.unwrap_or(0.0);
    let current = response
        .predictions
        .get(target_name)
        .and_then(format::json_number);
    EffortReliability::Report(EffortPanelView {
        target: report.target.clone(),
        model_name: report.model_name.clone(),
        r2_fraction: r2.clamp(0.0, 1.0) as f32,
        reliability_percent: format::format_percent(r2),
        mae: format::format_number(report.mae_mean),
        current_estimate: format::format_number(current),
    })
}
