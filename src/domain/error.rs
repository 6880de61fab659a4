use thiserror::Error;

/// Errors raised by the data pipeline before any training happens.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV must contain a '{0}' column")]
    MissingLabelColumn(String),

    #[error("CSV contains no data rows")]
    Empty,

    #[error("CSV contains no feature columns besides '{0}'")]
    NoFeatures(String),

    /// `row` is 1-based and counts data rows only.
    #[error("row {row}, column '{column}': cannot parse '{value}' as a number")]
    InvalidNumber {
        row:    usize,
        column: String,
        value:  String,
    },

    #[error("cannot split dataset: {0}")]
    Split(String),

    #[error("need at least 2 distinct labels, found {0}")]
    TooFewClasses(usize),

    #[error("label '{0}' was not seen when fitting the label binarizer")]
    UnknownLabel(String),

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
}
