//! Canonical categories and the raw vendor labels mapped onto them.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// The kind of thing a canonical category standardizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Physician/APP specialty (e.g. "Cardiology").
    Specialty,
    /// Provider type (e.g. "Physician", "CRNA").
    ProviderType,
    /// Geographic region (e.g. "Midwest").
    Region,
    /// Survey column/variable (e.g. "tcc_p50").
    Column,
}

impl CategoryKind {
    /// All kinds, in a stable order.
    pub const ALL: [CategoryKind; 4] = [
        CategoryKind::Specialty,
        CategoryKind::ProviderType,
        CategoryKind::Region,
        CategoryKind::Column,
    ];

    /// Stable lowercase name, used for repository filenames and CLI flags.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specialty => "specialty",
            Self::ProviderType => "provider_type",
            Self::Region => "region",
            Self::Column => "column",
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw label as observed in one vendor's export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLabel {
    /// The label text as it appeared in the upload.
    pub label: String,
    /// The originating survey vendor (e.g. "MGMA").
    pub vendor: String,
}

/// A standardized name plus the confirmed vendor labels that map onto it.
///
/// Categories only grow: confirming another vendor variant appends to
/// `source_labels`. Removing a category entirely goes through the store's
/// dedicated removal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalCategory {
    /// The standardized display name (unique within its kind).
    pub standardized_name: String,
    /// What this category standardizes.
    pub kind: CategoryKind,
    /// Confirmed vendor labels, in confirmation order.
    pub source_labels: Vec<SourceLabel>,
}

impl CanonicalCategory {
    /// Creates an empty category. Rejects blank names.
    pub fn new(standardized_name: impl Into<String>, kind: CategoryKind) -> Result<Self> {
        let standardized_name = standardized_name.into();
        if standardized_name.trim().is_empty() {
            return Err(ModelError::BlankCategoryName);
        }
        Ok(Self {
            standardized_name,
            kind,
            source_labels: Vec::new(),
        })
    }

    /// Appends a confirmed source label.
    ///
    /// Duplicate `(label, vendor)` pairs are ignored (label compared
    /// case-insensitively); the same label under a different vendor is a
    /// distinct confirmation and is kept.
    pub fn add_source_label(
        &mut self,
        label: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Result<bool> {
        let label = label.into();
        let vendor = vendor.into();
        if label.trim().is_empty() {
            return Err(ModelError::BlankLabel);
        }
        if vendor.trim().is_empty() {
            return Err(ModelError::BlankVendor);
        }
        if self.has_source_label(&label, &vendor) {
            return Ok(false);
        }
        self.source_labels.push(SourceLabel { label, vendor });
        Ok(true)
    }

    /// True if this exact `(label, vendor)` pair is already confirmed.
    #[must_use]
    pub fn has_source_label(&self, label: &str, vendor: &str) -> bool {
        self.source_labels.iter().any(|s| {
            s.label.eq_ignore_ascii_case(label.trim()) && s.vendor.eq_ignore_ascii_case(vendor)
        })
    }

    /// True if this label is confirmed under any vendor.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        self.source_labels
            .iter()
            .any(|s| s.label.eq_ignore_ascii_case(label.trim()))
    }
}
