use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::LabelColors;
use crate::context::CorrelationView;
use crate::data::model::Label;

// ---------------------------------------------------------------------------
// Correlation scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter of the selected column pair, coloured by label.
pub fn correlation_plot(ui: &mut Ui, view: &CorrelationView, colors: &LabelColors) {
    let heading = match view.pearson_r {
        Some(r) => format!("{}  (r = {r:.3})", view.title()),
        None => view.title(),
    };
    ui.label(RichText::new(heading).strong());

    if view.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No complete rows for this pair of columns");
        });
        return;
    }

    Plot::new("correlation_plot")
        .legend(Legend::default())
        .x_axis_label(view.x.name())
        .y_axis_label(view.y.name())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (label, points) in [(Label::Bad, &view.bad), (Label::Good, &view.good)] {
                if points.is_empty() {
                    continue;
                }
                let series = Points::new(PlotPoints::new(points.clone()))
                    .name(format!("quality: {label}"))
                    .color(colors.color_for(label))
                    .radius(2.5);
                plot_ui.points(series);
            }
        });
}
