//! Shared state types for the egui UI.

use egui::Color32;

use crate::egui_app::ui::style;
use crate::estimator::api::PredictionResponse;
use crate::estimator::inputs::InputMap;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    /// Current submission lifecycle state.
    pub session: SessionState,
    /// One-shot request to scroll the results section into view.
    pub scroll_to_results: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            session: SessionState::default(),
            scroll_to_results: false,
        }
    }
}

/// Lifecycle of one estimation session. Exactly one variant is active;
/// transitions happen only through the controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    /// No submission yet, or the session was reset.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last submission succeeded.
    Success(SessionResults),
    /// The last submission failed; carries the advisory message.
    Error(String),
}

impl SessionState {
    /// True while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

/// Payload of a successful submission: the response plus the input snapshot
/// captured at submit time. Provenance is derived from the snapshot, never
/// from the response, so edits made while loading cannot re-tag old results.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionResults {
    pub snapshot: InputMap,
    pub response: PredictionResponse,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
}

impl StatusBarState {
    /// Default status shown before the first submission.
    pub fn idle() -> Self {
        Self {
            text: "Enter known project values to get started".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}
