use std::path::Path;

use anyhow::{Context, Result};

use crate::classifier::{evaluate, Evaluation, LogisticClassifier, QualityClassifier};
use crate::config::DashboardConfig;
use crate::data::loader;
use crate::data::model::{Column, Feature, Label, WineDataset, FEATURE_COUNT};
use crate::data::prepare::{self, PreparedDataset};
use crate::error::{ClassifierError, ValidationError};

// ---------------------------------------------------------------------------
// Application context
// ---------------------------------------------------------------------------

/// Everything built once at startup and only read afterwards: the prepared
/// dataset and the classifier fitted against its training subset.
pub struct AppContext {
    pub dataset: PreparedDataset,
    pub classifier: Box<dyn QualityClassifier>,
    /// Held-out score of `classifier` on the test subset.
    pub evaluation: Evaluation,
}

impl AppContext {
    /// Load, prepare and fit from the configured file.
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        let raw = loader::load_file(&config.data_path, config.delimiter)
            .with_context(|| format!("loading {}", config.data_path.display()))?;
        log::info!(
            "Loaded {} rows from {}",
            raw.len(),
            display_path(&config.data_path)
        );
        let classifier = LogisticClassifier::new(config.training.clone());
        Self::build(raw, config, Box::new(classifier))
    }

    /// Prepare `raw` and fit `classifier` against the training subset.
    pub fn build(
        raw: WineDataset,
        config: &DashboardConfig,
        mut classifier: Box<dyn QualityClassifier>,
    ) -> Result<Self> {
        let dataset = prepare::prepare(raw, &config.preparation);
        prepare::log_summary(&dataset);

        // A blank score would otherwise binarise to "bad" and train as such.
        let missing_scores = dataset.missing_quality();
        if missing_scores > 0 {
            return Err(ClassifierError::MissingQuality(missing_scores))
                .with_context(|| format!("fitting {}", classifier.name()));
        }

        let (features, labels): (Vec<[f64; FEATURE_COUNT]>, Vec<Label>) = dataset
            .train_samples()
            .map(|s| (s.features, s.label))
            .unzip();
        classifier
            .fit(&features, &labels)
            .with_context(|| format!("fitting {}", classifier.name()))?;

        let evaluation = evaluate(classifier.as_ref(), dataset.test_samples())
            .context("scoring the held-out subset")?;
        match evaluation.accuracy() {
            Some(acc) => log::info!(
                "{} held-out accuracy {:.3} ({}/{})",
                classifier.name(),
                acc,
                evaluation.correct(),
                evaluation.total()
            ),
            None => log::warn!("Test subset is empty; no held-out accuracy"),
        }

        Ok(AppContext {
            dataset,
            classifier,
            evaluation,
        })
    }

    /// Scatter data for one pair of columns over the whole prepared dataset.
    pub fn correlation_view(&self, x: Column, y: Column) -> CorrelationView {
        correlation_view(&self.dataset, x, y)
    }

    /// Classify the wine described by the form and phrase the verdict.
    pub fn request_prediction(&self, inputs: &[String]) -> Result<Verdict, ClassifierError> {
        let sample = parse_inputs(inputs)?;
        let (label, probability) = self.classifier.classify(&sample)?;
        Ok(Verdict { label, probability })
    }
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

// ---------------------------------------------------------------------------
// Prediction request
// ---------------------------------------------------------------------------

/// Outcome of one prediction request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub label: Label,
    /// Probability of `label` under the model.
    pub probability: f64,
}

impl Verdict {
    pub fn message(&self) -> String {
        format!("This wine is predicted to be {} quality.", self.label)
    }
}

/// Parse the eleven form fields, in feature order.
pub fn parse_inputs(inputs: &[String]) -> Result<Vec<f64>, ValidationError> {
    if inputs.len() != FEATURE_COUNT {
        return Err(ValidationError::WrongLength {
            expected: FEATURE_COUNT,
            got: inputs.len(),
        });
    }
    Feature::ALL
        .iter()
        .zip(inputs)
        .map(|(feature, text)| {
            let field = feature.display_name().to_string();
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::Missing { field });
            }
            let value: f64 = text.parse().map_err(|_| ValidationError::NotNumeric {
                field: field.clone(),
                value: text.to_string(),
            })?;
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field });
            }
            Ok(value)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation view
// ---------------------------------------------------------------------------

/// Points of a two-column scatter, split by label.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationView {
    pub x: Column,
    pub y: Column,
    pub good: Vec<[f64; 2]>,
    pub bad: Vec<[f64; 2]>,
    /// Pearson coefficient, when defined.
    pub pearson_r: Option<f64>,
}

impl CorrelationView {
    pub fn title(&self) -> String {
        format!("Correlation between {} and {}", self.x, self.y)
    }

    pub fn len(&self) -> usize {
        self.good.len() + self.bad.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the scatter for `x` against `y`. Rows missing either value are
/// skipped.
pub fn correlation_view(dataset: &PreparedDataset, x: Column, y: Column) -> CorrelationView {
    let mut good = Vec::new();
    let mut bad = Vec::new();
    for sample in &dataset.samples {
        let point = [sample.value(x), sample.value(y)];
        if point.iter().any(|v| v.is_nan()) {
            continue;
        }
        match sample.label {
            Label::Good => good.push(point),
            Label::Bad => bad.push(point),
        }
    }
    let pearson_r = pearson(good.iter().chain(bad.iter()));
    CorrelationView {
        x,
        y,
        good,
        bad,
        pearson_r,
    }
}

fn pearson<'a>(points: impl Iterator<Item = &'a [f64; 2]> + Clone) -> Option<f64> {
    let n = points.clone().count();
    if n < 2 {
        return None;
    }
    let first = *points.clone().next()?;
    let varies = |axis: usize| points.clone().any(|p| p[axis] != first[axis]);
    if !varies(0) || !varies(1) {
        return None;
    }
    let nf = n as f64;
    let (sx, sy) = points
        .clone()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    let (mx, my) = (sx / nf, sy / nf);
    let (mut cov, mut vx, mut vy) = (0.0, 0.0, 0.0);
    for p in points {
        let (dx, dy) = (p[0] - mx, p[1] - my);
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }
    if vx <= 0.0 || vy <= 0.0 {
        return None;
    }
    Some(cov / (vx.sqrt() * vy.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::TrainingConfig;
    use crate::data::model::example_sample;
    use crate::data::prepare::PrepareConfig;

    /// Twenty distinct wines: alcohol drives quality, plus one duplicate row.
    fn fixture_csv() -> String {
        let mut s = String::from(
            "fixed acidity,volatile acidity,citric acid,residual sugar,chlorides,\
free sulfur dioxide,total sulfur dioxide,density,pH,sulphates,alcohol,quality\n",
        );
        for i in 0..20 {
            let alcohol = 8.5 + 0.2 * i as f64;
            let quality = if i < 10 { 5 } else { 7 };
            s.push_str(&format!(
                "{:.1},{:.2},0.3,{:.1},0.08,{},{},0.996,3.3,{:.2},{:.1},{}\n",
                7.0 + 0.1 * (i % 4) as f64,
                0.7 - 0.02 * i as f64,
                1.8 + 0.1 * (i % 3) as f64,
                10 + i % 5,
                30 + 2 * (i % 7),
                0.55 + 0.01 * i as f64,
                alcohol,
                quality
            ));
        }
        s.push_str("7.0,0.70,0.3,1.8,0.08,10,30,0.996,3.3,0.55,8.5,5\n");
        s
    }

    fn config() -> DashboardConfig {
        DashboardConfig {
            data_path: "unused.csv".into(),
            delimiter: b',',
            preparation: PrepareConfig::default(),
            training: TrainingConfig::default(),
        }
    }

    fn context() -> AppContext {
        let raw = loader::load_reader(fixture_csv().as_bytes(), b',').unwrap();
        AppContext::build(raw, &config(), Box::new(LogisticClassifier::default())).unwrap()
    }

    fn example_inputs() -> Vec<String> {
        example_sample().iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn builds_from_fixture() {
        let ctx = context();
        assert_eq!(ctx.dataset.duplicates_removed, 1);
        assert_eq!(ctx.dataset.len(), 20);
        assert_eq!(ctx.dataset.test.len(), 4);
        assert_eq!(ctx.dataset.train.len(), 16);
        assert_eq!(ctx.evaluation.total(), 4);
    }

    #[test]
    fn blank_quality_score_stops_startup() {
        let text = fixture_csv().replacen(",5\n", ",\n", 1);
        let raw = loader::load_reader(text.as_bytes(), b',').unwrap();
        assert!(raw.records[0].quality.is_nan());

        let err = AppContext::build(raw, &config(), Box::new(LogisticClassifier::default()))
            .err()
            .expect("build should refuse a missing quality score");
        assert!(matches!(
            err.downcast_ref::<ClassifierError>(),
            Some(ClassifierError::MissingQuality(1))
        ));
    }

    #[test]
    fn blank_measurement_stops_startup() {
        let text = fixture_csv().replacen("0.08,", ",", 1);
        let raw = loader::load_reader(text.as_bytes(), b',').unwrap();
        let result = AppContext::build(raw, &config(), Box::new(LogisticClassifier::default()));
        assert!(result.is_err());
    }

    #[test]
    fn example_wine_gets_a_stable_verdict() {
        let ctx = context();
        let first = ctx.request_prediction(&example_inputs()).unwrap();
        for _ in 0..5 {
            assert_eq!(ctx.request_prediction(&example_inputs()).unwrap(), first);
        }
        assert!(first.probability >= 0.5 && first.probability <= 1.0);
        assert!(first.message().starts_with("This wine is predicted to be "));
    }

    #[test]
    fn verdict_messages() {
        let good = Verdict {
            label: Label::Good,
            probability: 0.8,
        };
        let bad = Verdict {
            label: Label::Bad,
            probability: 0.8,
        };
        assert_eq!(good.message(), "This wine is predicted to be good quality.");
        assert_eq!(bad.message(), "This wine is predicted to be bad quality.");
    }

    #[test]
    fn invalid_form_input_is_a_validation_error() {
        let ctx = context();

        let mut inputs = example_inputs();
        inputs[Feature::Chlorides.index()] = "  ".into();
        assert!(matches!(
            ctx.request_prediction(&inputs),
            Err(ClassifierError::Validation(ValidationError::Missing { ref field })) if field == "Chlorides"
        ));

        inputs[Feature::Chlorides.index()] = "lots".into();
        assert!(matches!(
            ctx.request_prediction(&inputs),
            Err(ClassifierError::Validation(ValidationError::NotNumeric { .. }))
        ));

        inputs[Feature::Chlorides.index()] = "inf".into();
        assert!(matches!(
            ctx.request_prediction(&inputs),
            Err(ClassifierError::Validation(ValidationError::NonFinite { .. }))
        ));

        inputs.pop();
        assert!(matches!(
            ctx.request_prediction(&inputs),
            Err(ClassifierError::Validation(ValidationError::WrongLength { got: 10, .. }))
        ));
    }

    #[test]
    fn correlation_view_splits_by_label() {
        let ctx = context();
        let view = ctx.correlation_view(Column::Feature(Feature::Alcohol), Column::Quality);
        assert_eq!(view.title(), "Correlation between alcohol and quality");
        assert_eq!(view.good.len(), 10);
        assert_eq!(view.bad.len(), 10);
        assert!(view.good.iter().all(|p| p[1] == 1.0));
        assert!(view.bad.iter().all(|p| p[1] == 0.0));
        assert!(view.pearson_r.unwrap() > 0.8);
    }

    #[test]
    fn correlation_of_column_with_itself_is_one() {
        let ctx = context();
        let col = Column::Feature(Feature::Sulphates);
        let r = ctx.correlation_view(col, col).pearson_r.unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_column_has_no_correlation() {
        let ctx = context();
        let view = ctx.correlation_view(
            Column::Feature(Feature::CitricAcid),
            Column::Feature(Feature::Alcohol),
        );
        assert_eq!(view.len(), 20);
        assert_eq!(view.pearson_r, None);
    }

    #[test]
    fn parse_inputs_accepts_example_values() {
        let parsed = parse_inputs(&example_inputs()).unwrap();
        assert_eq!(parsed, example_sample().to_vec());
    }
}
