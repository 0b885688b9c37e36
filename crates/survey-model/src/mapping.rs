//! Mapping suggestion types shared between the auto-mapper and its callers.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A raw label with no confirmed mapping for its vendor.
///
/// Recomputed on demand by diffing observed labels against the confirmed
/// mapping store; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedLabel {
    /// The label text (case-insensitively deduplicated by the extractor).
    pub name: String,
    /// The originating survey vendor.
    pub vendor: String,
    /// How many times this label was observed in the upload.
    pub occurrence_count: u32,
}

impl UnmappedLabel {
    /// Creates an unmapped label with a single occurrence.
    pub fn new(name: impl Into<String>, vendor: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let vendor = vendor.into();
        if name.trim().is_empty() {
            return Err(ModelError::BlankLabel);
        }
        if vendor.trim().is_empty() {
            return Err(ModelError::BlankVendor);
        }
        Ok(Self {
            name,
            vendor,
            occurrence_count: 1,
        })
    }
}

/// One candidate canonical category for an unmapped label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingSuggestion {
    /// The candidate category's standardized name.
    pub standardized_name: String,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
}

/// Toggles and thresholds for the auto-mapper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Enable fuzzy string-similarity comparisons.
    pub use_string_matching: bool,
    /// Enable synonym-table lookups.
    pub use_synonyms: bool,
    /// Minimum confidence for a suggestion to be auto-accepted.
    ///
    /// Suggestions below this still appear in ranked output; the display
    /// floor is a separate, lower cutoff owned by the engine.
    pub confidence_threshold: f64,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            use_string_matching: true,
            use_synonyms: true,
            confidence_threshold: 0.8,
        }
    }
}
