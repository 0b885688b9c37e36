//! Error types for blend operations.

use thiserror::Error;

/// Errors from blend operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlendError {
    /// Aggregation was invoked with zero selected rows.
    ///
    /// Callers must not build a blend from an empty selection; this is a
    /// precondition, not a recoverable state.
    #[error("cannot blend an empty row selection")]
    EmptySelection,

    /// The weight vector does not line up with the row selection.
    #[error("weight vector length {weights} does not match {rows} selected rows")]
    WeightLengthMismatch { rows: usize, weights: usize },

    /// A negative weight reached the aggregator.
    #[error("negative weight {value} at row {index}")]
    NegativeWeight { index: usize, value: String },
}
