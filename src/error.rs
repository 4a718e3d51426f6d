use thiserror::Error;

/// Errors raised by the loss computations before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SoftmaxError {
    #[error("shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("label {label} at index {index} is outside [0, {classes})")]
    LabelOutOfRange {
        index: usize,
        label: usize,
        classes: usize,
    },

    #[error("batch contains no examples")]
    EmptyBatch,

    #[error("weight matrix has no classes")]
    NoClasses,

    #[error("regularization strength must be finite and non-negative, got {0}")]
    InvalidRegularization(f64),

    #[error("weight scale must be finite, got {0}")]
    InvalidWeightScale(f64),

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, SoftmaxError>;
