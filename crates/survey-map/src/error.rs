//! Error types for mapping operations.

use thiserror::Error;

use survey_model::{CategoryKind, ModelError};

/// Errors from mapping operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MapError {
    /// No category with this name exists for the kind.
    #[error("category not found: {name} ({kind})")]
    CategoryNotFound { name: String, kind: CategoryKind },

    /// A category with this name already exists for the kind.
    #[error("duplicate category: {name} ({kind})")]
    DuplicateCategory { name: String, kind: CategoryKind },

    /// Model-level validation failure (blank label, vendor, or name).
    #[error(transparent)]
    Model(#[from] ModelError),
}
