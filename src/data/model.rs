use std::fmt;

// ---------------------------------------------------------------------------
// Feature – one of the eleven physicochemical measurements
// ---------------------------------------------------------------------------

/// Number of measurements describing a wine.
pub const FEATURE_COUNT: usize = 11;

/// Header name of the continuous quality score.
pub const QUALITY_COLUMN: &str = "quality";

/// Scores at or above this threshold are labelled good.
pub const GOOD_QUALITY_THRESHOLD: f64 = 6.0;

/// The measurements, in the fixed order the classifier consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    FixedAcidity,
    VolatileAcidity,
    CitricAcid,
    ResidualSugar,
    Chlorides,
    FreeSulfurDioxide,
    TotalSulfurDioxide,
    Density,
    Ph,
    Sulphates,
    Alcohol,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::FixedAcidity,
        Feature::VolatileAcidity,
        Feature::CitricAcid,
        Feature::ResidualSugar,
        Feature::Chlorides,
        Feature::FreeSulfurDioxide,
        Feature::TotalSulfurDioxide,
        Feature::Density,
        Feature::Ph,
        Feature::Sulphates,
        Feature::Alcohol,
    ];

    /// Position in a feature vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header name in the CSV file.
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::FixedAcidity => "fixed acidity",
            Feature::VolatileAcidity => "volatile acidity",
            Feature::CitricAcid => "citric acid",
            Feature::ResidualSugar => "residual sugar",
            Feature::Chlorides => "chlorides",
            Feature::FreeSulfurDioxide => "free sulfur dioxide",
            Feature::TotalSulfurDioxide => "total sulfur dioxide",
            Feature::Density => "density",
            Feature::Ph => "pH",
            Feature::Sulphates => "sulphates",
            Feature::Alcohol => "alcohol",
        }
    }

    /// Human-readable label for form fields.
    pub fn display_name(self) -> &'static str {
        match self {
            Feature::FixedAcidity => "Fixed Acidity",
            Feature::VolatileAcidity => "Volatile Acidity",
            Feature::CitricAcid => "Citric Acid",
            Feature::ResidualSugar => "Residual Sugar",
            Feature::Chlorides => "Chlorides",
            Feature::FreeSulfurDioxide => "Free Sulfur Dioxide",
            Feature::TotalSulfurDioxide => "Total Sulfur Dioxide",
            Feature::Density => "Density",
            Feature::Ph => "pH",
            Feature::Sulphates => "Sulphates",
            Feature::Alcohol => "Alcohol",
        }
    }

    /// Measurement of the example wine the prediction form starts with.
    pub fn example_value(self) -> f64 {
        match self {
            Feature::FixedAcidity => 9.1,
            Feature::VolatileAcidity => 0.44,
            Feature::CitricAcid => 0.5,
            Feature::ResidualSugar => 1.7,
            Feature::Chlorides => 0.071,
            Feature::FreeSulfurDioxide => 6.9,
            Feature::TotalSulfurDioxide => 15.0,
            Feature::Density => 0.995,
            Feature::Ph => 3.11,
            Feature::Sulphates => 0.7,
            Feature::Alcohol => 11.9,
        }
    }

    pub fn from_column_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// The example wine as a feature vector.
pub fn example_sample() -> [f64; FEATURE_COUNT] {
    Feature::ALL.map(Feature::example_value)
}

// ---------------------------------------------------------------------------
// Column – anything the correlation view can put on an axis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Feature(Feature),
    /// The binarised quality label (0 or 1).
    Quality,
}

impl Column {
    /// All selectable columns in file order.
    pub fn all() -> Vec<Column> {
        Feature::ALL
            .into_iter()
            .map(Column::Feature)
            .chain(std::iter::once(Column::Quality))
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::Feature(f) => f.column_name(),
            Column::Quality => QUALITY_COLUMN,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Bad = 0,
    Good = 1,
}

impl Label {
    /// Binarise a continuous quality score.
    pub fn from_quality(quality: f64) -> Label {
        if quality >= GOOD_QUALITY_THRESHOLD {
            Label::Good
        } else {
            Label::Bad
        }
    }

    pub fn as_usize(self) -> usize {
        self as usize
    }

    pub fn from_usize(v: usize) -> Label {
        if v == 0 {
            Label::Bad
        } else {
            Label::Good
        }
    }

    pub fn as_f64(self) -> f64 {
        self as usize as f64
    }

    pub fn opposite(self) -> Label {
        match self {
            Label::Bad => Label::Good,
            Label::Good => Label::Bad,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Good => f.write_str("good"),
            Label::Bad => f.write_str("bad"),
        }
    }
}

// ---------------------------------------------------------------------------
// WineRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single wine as loaded. Missing cells are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct WineRecord {
    pub features: [f64; FEATURE_COUNT],
    pub quality: f64,
}

impl WineRecord {
    pub fn feature(&self, feature: Feature) -> f64 {
        self.features[feature.index()]
    }

    /// Bit-level identity used for duplicate detection: NaN equals NaN and
    /// `-0.0` equals `0.0`.
    pub fn identity(&self) -> [u64; FEATURE_COUNT + 1] {
        fn key(v: f64) -> u64 {
            if v == 0.0 {
                0.0f64.to_bits()
            } else if v.is_nan() {
                f64::NAN.to_bits()
            } else {
                v.to_bits()
            }
        }
        let mut out = [0u64; FEATURE_COUNT + 1];
        for (slot, v) in out.iter_mut().zip(self.features.iter()) {
            *slot = key(*v);
        }
        out[FEATURE_COUNT] = key(self.quality);
        out
    }

    pub fn has_missing(&self) -> bool {
        self.quality.is_nan() || self.features.iter().any(|v| v.is_nan())
    }
}

// ---------------------------------------------------------------------------
// WineDataset – the loaded file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct WineDataset {
    pub records: Vec<WineRecord>,
}

impl WineDataset {
    pub fn new(records: Vec<WineRecord>) -> Self {
        WineDataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LabeledSample – features paired with the derived label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub features: [f64; FEATURE_COUNT],
    pub label: Label,
}

impl LabeledSample {
    /// Value on an axis of the correlation view.
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Feature(f) => self.features[f.index()],
            Column::Quality => self.label.as_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_threshold_boundary() {
        assert_eq!(Label::from_quality(6.0), Label::Good);
        assert_eq!(Label::from_quality(5.999), Label::Bad);
        assert_eq!(Label::from_quality(0.0), Label::Bad);
        assert_eq!(Label::from_quality(10.0), Label::Good);
        assert_eq!(Label::from_quality(f64::NAN), Label::Bad);
    }

    #[test]
    fn feature_order_matches_index() {
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(Feature::from_column_name(f.column_name()), Some(*f));
        }
        assert_eq!(Feature::from_column_name("quality"), None);
    }

    #[test]
    fn example_sample_in_feature_order() {
        let s = example_sample();
        assert_eq!(s[0], 9.1);
        assert_eq!(s[Feature::Ph.index()], 3.11);
        assert_eq!(s[FEATURE_COUNT - 1], 11.9);
    }

    #[test]
    fn identity_treats_nan_and_signed_zero_as_equal() {
        let mut a = WineRecord {
            features: [0.0; FEATURE_COUNT],
            quality: 5.0,
        };
        let mut b = a.clone();
        a.features[0] = -0.0;
        a.features[1] = f64::NAN;
        b.features[1] = f64::NAN;
        assert_eq!(a.identity(), b.identity());
        b.quality = 6.0;
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn columns_end_with_quality() {
        let cols = Column::all();
        assert_eq!(cols.len(), FEATURE_COUNT + 1);
        assert_eq!(cols[0].name(), "fixed acidity");
        assert_eq!(cols.last().copied(), Some(Column::Quality));
    }
}
