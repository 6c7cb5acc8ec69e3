use linfa::prelude::*;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{s, Array1, Array2};

use crate::data::model::{Label, FEATURE_COUNT};
use crate::error::ClassifierError;

use super::{validate_sample, QualityClassifier};

// ---------------------------------------------------------------------------
// Solver parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    /// L2 regularisation strength.
    pub alpha: f64,
    pub max_iterations: u64,
    pub gradient_tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            max_iterations: 100,
            gradient_tolerance: 1e-4,
        }
    }
}

// ---------------------------------------------------------------------------
// Binary logistic regression backed by linfa
// ---------------------------------------------------------------------------

/// L2-regularised logistic regression over the eleven raw measurements.
pub struct LogisticClassifier {
    config: TrainingConfig,
    fitted: Option<Fitted>,
}

struct Fitted {
    model: FittedLogisticRegression<f64, usize>,
    /// The class whose probability the solver reports.
    positive: Label,
}

impl LogisticClassifier {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            fitted: None,
        }
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    fn fitted(&self) -> Result<&Fitted, ClassifierError> {
        self.fitted.as_ref().ok_or(ClassifierError::NotFitted)
    }

    /// Single validated sample as a 1x11 matrix.
    fn row(sample: &[f64]) -> Result<Array2<f64>, ClassifierError> {
        let values = validate_sample(sample)?;
        Array2::from_shape_vec((1, FEATURE_COUNT), values.to_vec())
            .map_err(|e| ClassifierError::Solver(e.to_string()))
    }
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

impl QualityClassifier for LogisticClassifier {
    fn fit(
        &mut self,
        features: &[[f64; FEATURE_COUNT]],
        labels: &[Label],
    ) -> Result<(), ClassifierError> {
        if features.len() != labels.len() {
            return Err(ClassifierError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if features.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        let missing = features
            .iter()
            .flat_map(|row| row.iter())
            .filter(|v| !v.is_finite())
            .count();
        if missing > 0 {
            return Err(ClassifierError::MissingTrainingValues(missing));
        }
        if labels.iter().all(|l| *l == labels[0]) {
            return Err(ClassifierError::SingleClass);
        }

        let flat: Vec<f64> = features.iter().flat_map(|row| row.iter().copied()).collect();
        let records = Array2::from_shape_vec((features.len(), FEATURE_COUNT), flat)
            .map_err(|e| ClassifierError::Solver(e.to_string()))?;
        let targets: Array1<usize> = labels.iter().map(|l| l.as_usize()).collect();
        let first = records.slice(s![0..1, ..]).to_owned();
        let dataset = Dataset::new(records, targets);

        let model = LogisticRegression::default()
            .alpha(self.config.alpha)
            .max_iterations(self.config.max_iterations)
            .gradient_tolerance(self.config.gradient_tolerance)
            .fit(&dataset)
            .map_err(|e| ClassifierError::Solver(e.to_string()))?;

        // The solver labels a row positive once its probability reaches 0.5;
        // one training row is enough to tell which class that is.
        let p_first = first_value(model.predict_probabilities(&first))?;
        let predicted: Array1<usize> = model.predict(&first);
        let label_first = Label::from_usize(first_value(predicted)?);
        let positive = if p_first >= 0.5 {
            label_first
        } else {
            label_first.opposite()
        };

        log::debug!(
            "Fitted logistic regression: intercept {:.4}, weights {:?}, positive class {positive}",
            model.intercept(),
            model.params().to_vec()
        );
        self.fitted = Some(Fitted { model, positive });
        Ok(())
    }

    fn classify(&self, sample: &[f64]) -> Result<(Label, f64), ClassifierError> {
        let fitted = self.fitted()?;
        let x = Self::row(sample)?;
        let p_positive = first_value(fitted.model.predict_probabilities(&x))?;
        Ok(if p_positive >= 0.5 {
            (fitted.positive, p_positive)
        } else {
            (fitted.positive.opposite(), 1.0 - p_positive)
        })
    }

    fn name(&self) -> &str {
        "logistic regression"
    }
}

fn first_value<T: Copy>(values: Array1<T>) -> Result<T, ClassifierError> {
    values
        .first()
        .copied()
        .ok_or_else(|| ClassifierError::Solver("empty prediction".into()))
}
