//! egui renderer for the estimation form and results view.

use eframe::egui::{
    self, Align, Frame, Margin, ProgressBar, RichText, Ui,
};

use crate::egui_app::controller::EstimatorController;
use crate::egui_app::state::{SessionResults, SessionState};
use crate::egui_app::view_model::{self, EffortReliability, Provenance};
use crate::estimator::api::{TEST_SPLIT_ROWS, TRAIN_SPLIT_ROWS};
use crate::estimator::fields::CanonicalField;

pub mod style;

/// Smallest window that still fits the input grid and the results table.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 560.0);

const FIELD_COLUMNS: usize = 3;
const RESULT_CARD_COLUMNS: usize = 3;

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EstimatorController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let mut controller = EstimatorController::new();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Greenfield Effort Estimator")
                            .color(palette.text_primary)
                            .strong(),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }

    fn render_input_section(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Input Known Values");
        ui.label(
            RichText::new("Enter the project attributes you know; the model estimates the rest.")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);

        // Collect edits while widgets borrow the draft text, apply after.
        let mut edits: Vec<(CanonicalField, String)> = Vec::new();
        egui::Grid::new("input_grid")
            .num_columns(FIELD_COLUMNS)
            .spacing(egui::vec2(16.0, 10.0))
            .show(ui, |ui| {
                for row in CanonicalField::ALL.chunks(FIELD_COLUMNS) {
                    for &field in row {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(field.wire_name())
                                    .color(palette.text_muted)
                                    .small(),
                            );
                            let mut draft = self.controller.input_text(field).to_string();
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut draft)
                                    .hint_text("unknown")
                                    .desired_width(200.0),
                            );
                            if response.changed() {
                                edits.push((field, sanitize_numeric(&draft)));
                            }
                        });
                    }
                    ui.end_row();
                }
            });
        for (field, value) in edits {
            self.controller.set_field(field, &value);
        }

        ui.add_space(12.0);
        let loading = self.controller.is_loading();
        ui.horizontal(|ui| {
            let submit_label = if loading {
                "Estimating…"
            } else {
                "Estimate Effort"
            };
            let can_submit = !loading && self.controller.has_any_input();
            if ui
                .add_enabled(can_submit, egui::Button::new(submit_label))
                .clicked()
            {
                self.controller.submit();
            }
            ui.add_space(8.0);
            if ui.button("Clear").clicked() {
                self.controller.reset();
            }
        });

        if let SessionState::Error(message) = &self.controller.ui.session {
            ui.add_space(8.0);
            ui.label(
                RichText::new(message.clone())
                    .color(style::status_badge_color(style::StatusTone::Error)),
            );
        }
    }

    fn render_results(&mut self, ui: &mut Ui, results: &SessionResults, scroll_requested: bool) {
        let palette = style::palette();
        let rows = view_model::prediction_rows(&results.snapshot, &results.response);

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);
        let heading = ui.heading("Estimated Results By Model");
        if scroll_requested {
            heading.scroll_to_me(Some(Align::Min));
        }
        ui.add_space(8.0);

        for card_row in rows.chunks(RESULT_CARD_COLUMNS) {
            ui.horizontal(|ui| {
                for row in card_row {
                    let stroke = match row.provenance {
                        Provenance::UserProvided => style::user_provided_stroke(),
                        Provenance::ModelEstimated => style::section_stroke(),
                    };
                    Frame::new()
                        .fill(palette.bg_tertiary)
                        .stroke(stroke)
                        .inner_margin(Margin::same(10))
                        .show(ui, |ui| {
                            ui.set_min_width(200.0);
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(&row.field).color(palette.text_muted).small(),
                                );
                                ui.label(
                                    RichText::new(&row.value)
                                        .color(palette.accent_ice)
                                        .strong(),
                                );
                                ui.label(
                                    RichText::new(row.provenance.label())
                                        .color(palette.text_muted)
                                        .small(),
                                );
                            });
                        });
                }
            });
            ui.add_space(8.0);
        }

        ui.add_space(8.0);
        ui.heading("Estimation Table");
        ui.add_space(4.0);
        egui::Grid::new("estimation_table")
            .num_columns(3)
            .striped(true)
            .min_col_width(160.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Field").strong());
                ui.label(RichText::new("Estimated Value").strong());
                ui.label(RichText::new("Source").strong());
                ui.end_row();
                for row in &rows {
                    ui.label(&row.field);
                    ui.label(&row.value);
                    ui.label(row.provenance.label());
                    ui.end_row();
                }
            });

        self.render_reliability(ui, &results.response);
    }

    fn render_reliability(&mut self, ui: &mut Ui, response: &crate::estimator::api::PredictionResponse) {
        let palette = style::palette();
        match view_model::effort_reliability(response) {
            EffortReliability::Missing => {}
            EffortReliability::Ambiguous(count) => {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!(
                        "{count} reliability reports target the effort field; none shown."
                    ))
                    .color(style::status_badge_color(style::StatusTone::Warning)),
                );
            }
            EffortReliability::Report(panel) => {
                ui.add_space(16.0);
                ui.heading("Reliability for Estimated Effort (man days)");
                ui.label(
                    RichText::new(format!(
                        "Train/test split used: {TRAIN_SPLIT_ROWS} train / {TEST_SPLIT_ROWS} test rows (fixed). \
                         Reliability is R\u{b2} on the held-out test set, expressed as a percentage."
                    ))
                    .color(palette.text_muted),
                );
                ui.add_space(8.0);
                ui.add(
                    ProgressBar::new(panel.r2_fraction)
                        .desired_width(480.0)
                        .fill(style::status_badge_color(style::StatusTone::Busy)),
                );
                ui.label(format!("Reliability: {}", panel.reliability_percent));
                ui.add_space(8.0);
                egui::Grid::new("reliability_table")
                    .num_columns(5)
                    .striped(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Target").strong());
                        ui.label(RichText::new("Model").strong());
                        ui.label(RichText::new("Reliability (%)").strong());
                        ui.label(RichText::new("MAE (man days)").strong());
                        ui.label(RichText::new("Current Estimated Value (man days)").strong());
                        ui.end_row();
                        ui.label(&panel.target);
                        ui.label(&panel.model_name);
                        ui.label(&panel.reliability_percent);
                        ui.label(&panel.mae);
                        ui.label(&panel.current_estimate);
                        ui.end_row();
                    });
            }
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        if self.controller.is_loading() {
            // Keep polling for the worker result while a request is in flight.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.render_top_bar(ctx);
        self.render_status(ctx);

        let scroll_requested = std::mem::take(&mut self.controller.ui.scroll_to_results);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .show(ui, |ui| {
                    ui.add_space(8.0);
                    self.render_input_section(ui);
                    if let SessionState::Success(results) = self.controller.ui.session.clone() {
                        self.render_results(ui, &results, scroll_requested);
                    }
                    ui.add_space(16.0);
                });
        });
    }
}

/// Constrain entry to non-negative numeric text: digits and at most one dot.
fn sanitize_numeric(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_dot = false;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_digits_and_one_dot() {
        assert_eq!(sanitize_numeric("1234"), "1234");
        assert_eq!(sanitize_numeric("12.5"), "12.5");
        assert_eq!(sanitize_numeric("1.2.5"), "1.25");
        assert_eq!(sanitize_numeric("-42"), "42");
        assert_eq!(sanitize_numeric("1,000"), "1000");
        assert_eq!(sanitize_numeric("abc"), "");
    }

    #[test]
    fn sanitized_blank_still_clears_a_field() {
        let mut controller = EstimatorController::new();
        controller.set_field(CanonicalField::Ricefw, &sanitize_numeric("40"));
        assert!(controller.has_any_input());
        controller.set_field(CanonicalField::Ricefw, &sanitize_numeric("abc"));
        assert!(!controller.has_any_input());
    }
}
