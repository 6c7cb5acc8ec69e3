use eframe::egui;

use crate::color::LabelColors;
use crate::context::AppContext;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WineDashApp {
    /// Prepared data and fitted classifier; read-only once the window opens.
    pub context: AppContext,
    pub state: AppState,
    pub colors: LabelColors,
}

impl WineDashApp {
    pub fn new(context: AppContext) -> Self {
        let state = AppState::new(&context);
        Self {
            context,
            state,
            colors: LabelColors::default(),
        }
    }
}

impl eframe::App for WineDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and model summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.context);
        });

        // ---- Left side panel: prediction form ----
        egui::SidePanel::left("prediction_panel")
            .default_width(300.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::prediction_panel(ui, &self.context, &mut self.state, &self.colors);
            });

        // ---- Central panel: correlation plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::axis_selectors(ui, &self.context, &mut self.state);
            plot::correlation_plot(ui, &self.state.view, &self.colors);
        });
    }
}
