use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::model::{
    Column, Feature, Label, LabeledSample, WineDataset, WineRecord, QUALITY_COLUMN,
};

// ---------------------------------------------------------------------------
// Preparation parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PrepareConfig {
    /// Share of rows held out for evaluation, in (0, 1).
    pub test_fraction: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.20,
            seed: 42,
        }
    }
}

// ---------------------------------------------------------------------------
// Prepared output
// ---------------------------------------------------------------------------

/// The cleaned, labelled dataset and its fixed train/test partition.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    /// Every row after duplicate removal, in file order.
    pub samples: Vec<LabeledSample>,
    /// Indices into `samples`.
    pub train: Vec<usize>,
    /// Indices into `samples`, disjoint from `train`.
    pub test: Vec<usize>,
    /// Rows dropped as exact duplicates.
    pub duplicates_removed: usize,
    /// Missing-value count per column, in column order.
    pub missing: Vec<(Column, usize)>,
}

impl PreparedDataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn train_samples(&self) -> impl Iterator<Item = &LabeledSample> {
        self.train.iter().map(|&i| &self.samples[i])
    }

    pub fn test_samples(&self) -> impl Iterator<Item = &LabeledSample> {
        self.test.iter().map(|&i| &self.samples[i])
    }

    /// Rows whose quality score was blank.
    pub fn missing_quality(&self) -> usize {
        self.missing
            .iter()
            .find(|(column, _)| *column == Column::Quality)
            .map_or(0, |(_, n)| *n)
    }

    pub fn total_missing(&self) -> usize {
        self.missing.iter().map(|(_, n)| n).sum()
    }
}

/// Run the full preparation: dedupe, count missing values, label, split.
pub fn prepare(mut dataset: WineDataset, config: &PrepareConfig) -> PreparedDataset {
    let before = dataset.len();
    drop_duplicates(&mut dataset);
    let duplicates_removed = before - dataset.len();

    let missing = missing_report(&dataset);

    let samples: Vec<LabeledSample> = dataset.records.iter().map(label_record).collect();
    let (train, test) = split_indices(samples.len(), config.test_fraction, config.seed);

    PreparedDataset {
        samples,
        train,
        test,
        duplicates_removed,
        missing,
    }
}

// ---------------------------------------------------------------------------
// Individual steps
// ---------------------------------------------------------------------------

/// Drop exact-duplicate rows, keeping the first occurrence.
pub fn drop_duplicates(dataset: &mut WineDataset) {
    let mut seen = HashSet::with_capacity(dataset.len());
    dataset.records.retain(|r| seen.insert(r.identity()));
}

/// Count missing values per column. Reported only; rows are kept.
///
/// The quality entry counts missing raw scores, before binarisation.
pub fn missing_report(dataset: &WineDataset) -> Vec<(Column, usize)> {
    let mut report: Vec<(Column, usize)> = Feature::ALL
        .into_iter()
        .map(|f| {
            let n = dataset
                .records
                .iter()
                .filter(|r| r.feature(f).is_nan())
                .count();
            (Column::Feature(f), n)
        })
        .collect();
    let quality = dataset.records.iter().filter(|r| r.quality.is_nan()).count();
    report.push((Column::Quality, quality));
    report
}

fn label_record(record: &WineRecord) -> LabeledSample {
    LabeledSample {
        features: record.features,
        label: Label::from_quality(record.quality),
    }
}

/// Number of rows held out for a dataset of `n` rows.
pub fn test_size(n: usize, test_fraction: f64) -> usize {
    ((n as f64) * test_fraction).round().min(n as f64) as usize
}

/// Shuffle `0..n` with a seeded RNG; the first `test_size` indices form the
/// test set. Both halves are returned sorted.
pub fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let n_test = test_size(n, test_fraction);
    let mut test = order[..n_test].to_vec();
    let mut train = order[n_test..].to_vec();
    test.sort_unstable();
    train.sort_unstable();
    (train, test)
}

/// Log the outcome of preparation.
pub fn log_summary(prepared: &PreparedDataset) {
    log::info!(
        "Prepared {} wines ({} duplicates dropped): {} train, {} test",
        prepared.len(),
        prepared.duplicates_removed,
        prepared.train.len(),
        prepared.test.len()
    );
    for (column, n) in &prepared.missing {
        if *n > 0 {
            log::warn!("Column '{column}' has {n} missing values");
        }
    }
    if prepared.total_missing() == 0 {
        log::info!("No missing values in any column, including '{QUALITY_COLUMN}'");
    }
}
