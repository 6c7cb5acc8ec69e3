use crate::context::{AppContext, CorrelationView, Verdict};
use crate::data::model::{Column, Feature, FEATURE_COUNT};

// ---------------------------------------------------------------------------
// Dashboard UI state
// ---------------------------------------------------------------------------

/// Outcome shown under the prediction form.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Verdict(Verdict),
    Invalid(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Column on the horizontal axis of the correlation view.
    pub x_column: Column,

    /// Column on the vertical axis.
    pub y_column: Column,

    /// Scatter for the current axis pair (cached).
    pub view: CorrelationView,

    /// Raw text of the eleven form fields, in feature order.
    pub inputs: Vec<String>,

    /// Result of the last "Predict" click.
    pub outcome: Option<PredictionOutcome>,
}

impl AppState {
    /// Default axes are the first two columns; the form holds the example wine.
    pub fn new(context: &AppContext) -> Self {
        let columns = Column::all();
        let x_column = columns[0];
        let y_column = columns[1];
        Self {
            x_column,
            y_column,
            view: context.correlation_view(x_column, y_column),
            inputs: example_inputs(),
            outcome: None,
        }
    }

    pub fn set_x_column(&mut self, context: &AppContext, column: Column) {
        self.x_column = column;
        self.refresh_view(context);
    }

    pub fn set_y_column(&mut self, context: &AppContext, column: Column) {
        self.y_column = column;
        self.refresh_view(context);
    }

    fn refresh_view(&mut self, context: &AppContext) {
        self.view = context.correlation_view(self.x_column, self.y_column);
    }

    /// Restore the example wine and clear the last verdict.
    pub fn reset_inputs(&mut self) {
        self.inputs = example_inputs();
        self.outcome = None;
    }

    /// Run a prediction for the current form contents.
    pub fn predict(&mut self, context: &AppContext) {
        self.outcome = Some(match context.request_prediction(&self.inputs) {
            Ok(verdict) => {
                log::info!(
                    "Predicted {} (p = {:.3})",
                    verdict.label,
                    verdict.probability
                );
                PredictionOutcome::Verdict(verdict)
            }
            Err(e) => {
                log::warn!("Prediction rejected: {e}");
                PredictionOutcome::Invalid(e.to_string())
            }
        });
    }
}

fn example_inputs() -> Vec<String> {
    let inputs: Vec<String> = Feature::ALL
        .iter()
        .map(|f| f.example_value().to_string())
        .collect();
    debug_assert_eq!(inputs.len(), FEATURE_COUNT);
    inputs
}
