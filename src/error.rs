use thiserror::Error;

/// Everything that can stop an overlay from being drawn.
///
/// All variants are raised before the figure reaches the backend, so a failed
/// call never leaves a partial figure on screen.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("field '{field}' not found in dataset of series '{label}'")]
    FieldNotFound { field: String, label: String },

    #[error("selection for series '{label}' has {actual} entries but the dataset has {expected} rows")]
    ShapeMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid bin specification: {0}")]
    InvalidBinSpec(String),

    #[error("unknown axis scale '{0}' (expected 'linear' or 'log')")]
    InvalidScale(String),

    #[error("field '{field}' of series '{label}' is not numeric at row {row}")]
    NonNumeric {
        field: String,
        label: String,
        row: usize,
    },

    #[error("column '{field}' has {actual} values, expected {expected}")]
    ColumnLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("series collection is empty")]
    EmptyCollection,

    #[error("invalid colour '{0}'")]
    Color(String),

    #[error("style error: {0}")]
    Style(#[from] serde_json::Error),

    #[error("display backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
