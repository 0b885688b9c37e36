use thiserror::Error;

/// Errors from model-level validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// A category name was empty or whitespace-only.
    #[error("category name is blank")]
    BlankCategoryName,

    /// A source label was empty or whitespace-only.
    #[error("source label is blank")]
    BlankLabel,

    /// A vendor identifier was empty or whitespace-only.
    #[error("vendor is blank")]
    BlankVendor,

    /// An unrecognized blend method name.
    #[error("unknown blend method: {0}")]
    UnknownBlendMethod(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
