use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors
// ---------------------------------------------------------------------------

/// The input file does not match the wine-quality schema.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("file has no header row")]
    Empty,

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("unexpected column '{0}'")]
    UnexpectedColumn(String),

    #[error("column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Prediction input errors
// ---------------------------------------------------------------------------

/// A prediction request could not be turned into eleven measurements.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("expected {expected} measurements, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("{field} is required")]
    Missing { field: String },

    #[error("{field}: '{value}' is not a number")]
    NotNumeric { field: String, value: String },

    #[error("{field} must be a finite number")]
    NonFinite { field: String },
}

// ---------------------------------------------------------------------------
// Classifier errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier used before fit")]
    NotFitted,

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("training set has {features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("training labels contain a single class")]
    SingleClass,

    #[error("training data has {0} missing values")]
    MissingTrainingValues(usize),

    #[error("{0} rows have no quality score")]
    MissingQuality(usize),

    #[error("solver failed: {0}")]
    Solver(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
