//! Quality classifier: a `{fit, predict}` capability over the eleven
//! measurements, plus held-out evaluation.
//!
//! The dashboard only talks to [`QualityClassifier`]; the concrete solver
//! lives behind it in [`logistic`].

pub mod logistic;

use crate::data::model::{Feature, Label, LabeledSample, FEATURE_COUNT};
use crate::error::{ClassifierError, ValidationError};

pub use logistic::{LogisticClassifier, TrainingConfig};

/// A binary wine-quality classifier.
pub trait QualityClassifier {
    /// Fit once against the training subset.
    fn fit(
        &mut self,
        features: &[[f64; FEATURE_COUNT]],
        labels: &[Label],
    ) -> Result<(), ClassifierError>;

    /// Classify one sample given as eleven values in feature order,
    /// returning the label and the model's probability of that label.
    fn classify(&self, sample: &[f64]) -> Result<(Label, f64), ClassifierError>;

    fn predict(&self, sample: &[f64]) -> Result<Label, ClassifierError> {
        self.classify(sample).map(|(label, _)| label)
    }

    fn name(&self) -> &str {
        "classifier"
    }
}

/// Check that `sample` holds exactly eleven finite values.
pub fn validate_sample(sample: &[f64]) -> Result<[f64; FEATURE_COUNT], ValidationError> {
    if sample.len() != FEATURE_COUNT {
        return Err(ValidationError::WrongLength {
            expected: FEATURE_COUNT,
            got: sample.len(),
        });
    }
    let mut out = [0.0; FEATURE_COUNT];
    for (feature, (&v, slot)) in Feature::ALL.iter().zip(sample.iter().zip(out.iter_mut())) {
        if !v.is_finite() {
            return Err(ValidationError::NonFinite {
                field: feature.display_name().to_string(),
            });
        }
        *slot = v;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Held-out evaluation
// ---------------------------------------------------------------------------

/// Confusion counts on a labelled subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub true_good: usize,
    pub true_bad: usize,
    pub false_good: usize,
    pub false_bad: usize,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.true_good + self.true_bad + self.false_good + self.false_bad
    }

    pub fn correct(&self) -> usize {
        self.true_good + self.true_bad
    }

    /// Share of correct predictions; `None` on an empty subset.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.correct() as f64 / n as f64),
        }
    }

    fn record(&mut self, actual: Label, predicted: Label) {
        match (actual, predicted) {
            (Label::Good, Label::Good) => self.true_good += 1,
            (Label::Bad, Label::Bad) => self.true_bad += 1,
            (Label::Bad, Label::Good) => self.false_good += 1,
            (Label::Good, Label::Bad) => self.false_bad += 1,
        }
    }
}

/// Score a fitted classifier on `samples`.
pub fn evaluate<'a, C, I>(classifier: &C, samples: I) -> Result<Evaluation, ClassifierError>
where
    C: QualityClassifier + ?Sized,
    I: IntoIterator<Item = &'a LabeledSample>,
{
    let mut eval = Evaluation::default();
    for sample in samples {
        let predicted = classifier.predict(&sample.features)?;
        eval.record(sample.label, predicted);
    }
    Ok(eval)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Predicts good when alcohol exceeds a cut-off.
    struct AlcoholRule(f64);

    impl QualityClassifier for AlcoholRule {
        fn fit(&mut self, _: &[[f64; FEATURE_COUNT]], _: &[Label]) -> Result<(), ClassifierError> {
            Ok(())
        }

        fn classify(&self, sample: &[f64]) -> Result<(Label, f64), ClassifierError> {
            let s = validate_sample(sample)?;
            let label = if s[Feature::Alcohol.index()] > self.0 {
                Label::Good
            } else {
                Label::Bad
            };
            Ok((label, 1.0))
        }
    }

    /// Counts calls through a `Cell`, so it is neither `Send` nor `Sync`.
    struct CountingRule {
        calls: std::cell::Cell<usize>,
        _local: std::rc::Rc<()>,
    }

    impl QualityClassifier for CountingRule {
        fn fit(&mut self, _: &[[f64; FEATURE_COUNT]], _: &[Label]) -> Result<(), ClassifierError> {
            Ok(())
        }

        fn classify(&self, sample: &[f64]) -> Result<(Label, f64), ClassifierError> {
            self.calls.set(self.calls.get() + 1);
            AlcoholRule(10.0).classify(sample)
        }
    }

    fn sample(alcohol: f64, label: Label) -> LabeledSample {
        let mut features = [1.0; FEATURE_COUNT];
        features[Feature::Alcohol.index()] = alcohol;
        LabeledSample { features, label }
    }

    #[test]
    fn validate_rejects_wrong_length() {
        assert_eq!(
            validate_sample(&[1.0; 10]),
            Err(ValidationError::WrongLength {
                expected: 11,
                got: 10
            })
        );
        assert!(validate_sample(&[1.0; 12]).is_err());
        assert!(validate_sample(&[]).is_err());
        assert!(validate_sample(&[1.0; 11]).is_ok());
    }

    #[test]
    fn validate_rejects_non_finite() {
        let mut s = [1.0; FEATURE_COUNT];
        s[Feature::Density.index()] = f64::NAN;
        assert_eq!(
            validate_sample(&s),
            Err(ValidationError::NonFinite {
                field: "Density".into()
            })
        );
        s[Feature::Density.index()] = f64::INFINITY;
        assert!(validate_sample(&s).is_err());
    }

    #[test]
    fn evaluation_counts_confusion() {
        let samples = vec![
            sample(12.0, Label::Good),
            sample(9.0, Label::Bad),
            sample(11.0, Label::Bad),
            sample(9.5, Label::Good),
        ];
        let eval = evaluate(&AlcoholRule(10.0), &samples).unwrap();
        assert_eq!(
            eval,
            Evaluation {
                true_good: 1,
                true_bad: 1,
                false_good: 1,
                false_bad: 1
            }
        );
        assert_eq!(eval.accuracy(), Some(0.5));
    }

    #[test]
    fn thread_local_classifier_is_scored_in_one_pass() {
        let rule = CountingRule {
            calls: std::cell::Cell::new(0),
            _local: std::rc::Rc::new(()),
        };
        let samples = vec![sample(12.0, Label::Good), sample(9.0, Label::Bad)];
        let eval = evaluate(&rule, &samples).unwrap();
        assert_eq!(eval.correct(), 2);
        assert_eq!(rule.calls.get(), samples.len());

        let boxed: Box<dyn QualityClassifier> = Box::new(rule);
        assert_eq!(boxed.predict(&samples[0].features).unwrap(), Label::Good);
    }

    #[test]
    fn empty_evaluation_has_no_accuracy() {
        let eval = evaluate(&AlcoholRule(10.0), &Vec::<LabeledSample>::new()).unwrap();
        assert_eq!(eval.total(), 0);
        assert_eq!(eval.accuracy(), None);
    }
}
