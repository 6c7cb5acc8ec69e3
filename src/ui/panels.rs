use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::LabelColors;
use crate::context::AppContext;
use crate::data::model::{Column, Feature};
use crate::state::{AppState, PredictionOutcome};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title plus a one-line summary of the data and model.
pub fn top_bar(ui: &mut Ui, context: &AppContext) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Wine Quality Prediction");
        ui.separator();

        let ds = &context.dataset;
        ui.label(format!(
            "{} wines ({} train / {} test)",
            ds.len(),
            ds.train.len(),
            ds.test.len()
        ));

        if ds.duplicates_removed > 0 {
            ui.separator();
            ui.label(format!("{} duplicates dropped", ds.duplicates_removed));
        }

        ui.separator();
        match context.evaluation.accuracy() {
            Some(acc) => ui.label(format!(
                "{}: {:.1}% held-out accuracy",
                context.classifier.name(),
                acc * 100.0
            )),
            None => ui.label(context.classifier.name()),
        };
    });
}

// ---------------------------------------------------------------------------
// Left side panel – prediction form
// ---------------------------------------------------------------------------

/// Eleven measurement fields, the Predict button and the verdict.
pub fn prediction_panel(ui: &mut Ui, context: &AppContext, state: &mut AppState, colors: &LabelColors) {
    ui.heading("Predict a wine");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("measurements")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for feature in Feature::ALL {
                        ui.label(feature.display_name());
                        let text = &mut state.inputs[feature.index()];
                        ui.add(egui::TextEdit::singleline(text).desired_width(100.0));
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Predict").clicked() {
                    state.predict(context);
                }
                if ui.small_button("Reset").clicked() {
                    state.reset_inputs();
                }
            });

            ui.add_space(12.0);
            ui.strong("Predicted Quality");
            match &state.outcome {
                Some(PredictionOutcome::Verdict(v)) => {
                    ui.label(RichText::new(v.message()).color(colors.color_for(v.label)));
                    ui.label(format!("Model confidence: {:.1}%", v.probability * 100.0));
                }
                Some(PredictionOutcome::Invalid(msg)) => {
                    ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
                }
                None => {
                    ui.label("Press Predict to classify the wine above.");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Axis selectors
// ---------------------------------------------------------------------------

/// Two dropdowns choosing the columns of the correlation plot.
pub fn axis_selectors(ui: &mut Ui, context: &AppContext, state: &mut AppState) {
    let columns = Column::all();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Feature 1 (X-axis)");
        let current = state.x_column;
        egui::ComboBox::from_id_salt("x_feature")
            .selected_text(current.name())
            .show_ui(ui, |ui: &mut Ui| {
                for col in &columns {
                    if ui.selectable_label(current == *col, col.name()).clicked() {
                        state.set_x_column(context, *col);
                    }
                }
            });

        ui.separator();

        ui.label("Feature 2 (Y-axis)");
        let current = state.y_column;
        egui::ComboBox::from_id_salt("y_feature")
            .selected_text(current.name())
            .show_ui(ui, |ui: &mut Ui| {
                for col in &columns {
                    if ui.selectable_label(current == *col, col.name()).clicked() {
                        state.set_y_column(context, *col);
                    }
                }
            });
    });
    ui.separator();
}
