//! File-system repository for confirmed category mappings.
//!
//! Each category kind is stored as one JSON file (`specialty.json`,
//! `provider_type.json`, `region.json`, `column.json`) so mappings confirmed
//! in one session are reused in the next. The repository also serves as the
//! persistence seam for bulk auto-mapping via [`MappingSaver`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use survey_model::{CanonicalCategory, CategoryKind};

use crate::engine::MappingSaver;
use crate::store::CategoryStore;

fn default_version() -> String {
    "1.0".to_string()
}

/// On-disk envelope for one kind's categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCategoryFile {
    /// The confirmed categories, in confirmation order.
    pub categories: Vec<CanonicalCategory>,
    /// When this file was last written (RFC 3339).
    pub saved_at: Option<String>,
    /// Version of the storage format.
    #[serde(default = "default_version")]
    pub version: String,
}

impl StoredCategoryFile {
    fn new(categories: Vec<CanonicalCategory>) -> Self {
        Self {
            categories,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            version: default_version(),
        }
    }
}

/// Summary of one stored kind, for listings.
#[derive(Debug, Clone)]
pub struct RepositoryEntry {
    pub kind: CategoryKind,
    pub file_path: PathBuf,
    pub category_count: usize,
    pub source_label_count: usize,
}

/// Directory-backed storage for confirmed category mappings.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    base_dir: PathBuf,
}

impl CategoryRepository {
    /// Opens (creating if needed) a repository at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("failed to create mapping repository: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves one kind's categories, replacing the previous file.
    pub fn save_kind(
        &self,
        kind: CategoryKind,
        categories: &[CanonicalCategory],
    ) -> Result<PathBuf> {
        let path = self.kind_path(kind);
        let stored = StoredCategoryFile::new(categories.to_vec());
        let json = serde_json::to_string_pretty(&stored)
            .with_context(|| format!("failed to serialize {kind} categories"))?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write mappings to {}", path.display()))?;
        info!(kind = %kind, count = categories.len(), path = %path.display(), "saved mappings");
        Ok(path)
    }

    /// Loads one kind's categories. `None` when nothing was saved yet.
    pub fn load_kind(&self, kind: CategoryKind) -> Result<Option<Vec<CanonicalCategory>>> {
        let path = self.kind_path(kind);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read mappings from {}", path.display()))?;
        let stored: StoredCategoryFile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse mappings from {}", path.display()))?;
        Ok(Some(stored.categories))
    }

    /// Loads every kind into one in-memory store.
    pub fn load_store(&self) -> Result<CategoryStore> {
        let mut categories = Vec::new();
        for kind in CategoryKind::ALL {
            if let Some(mut stored) = self.load_kind(kind)? {
                categories.append(&mut stored);
            }
        }
        CategoryStore::from_categories(categories)
            .with_context(|| format!("repository at {} is inconsistent", self.base_dir.display()))
    }

    /// Writes every kind of an in-memory store back to disk.
    pub fn save_store(&self, store: &CategoryStore) -> Result<()> {
        for kind in CategoryKind::ALL {
            let categories: Vec<CanonicalCategory> = store.of_kind(kind).cloned().collect();
            if categories.is_empty() && !self.kind_path(kind).exists() {
                continue;
            }
            self.save_kind(kind, &categories)?;
        }
        Ok(())
    }

    /// Lists stored kinds with their counts.
    pub fn list(&self) -> Result<Vec<RepositoryEntry>> {
        let mut entries = Vec::new();
        for kind in CategoryKind::ALL {
            let Some(categories) = self.load_kind(kind)? else {
                continue;
            };
            entries.push(RepositoryEntry {
                kind,
                file_path: self.kind_path(kind),
                category_count: categories.len(),
                source_label_count: categories.iter().map(|c| c.source_labels.len()).sum(),
            });
        }
        Ok(entries)
    }

    /// Deletes one kind's file. Returns false when it did not exist.
    pub fn delete_kind(&self, kind: CategoryKind) -> Result<bool> {
        let path = self.kind_path(kind);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to delete mappings at {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Checks whether a kind has been saved.
    #[must_use]
    pub fn exists(&self, kind: CategoryKind) -> bool {
        self.kind_path(kind).exists()
    }

    fn kind_path(&self, kind: CategoryKind) -> PathBuf {
        self.base_dir.join(format!("{}.json", kind.as_str()))
    }
}

impl MappingSaver for CategoryRepository {
    /// Persists one updated category by rewriting its kind's file.
    fn save_mapping(&self, category: &CanonicalCategory) -> Result<()> {
        let mut categories = self.load_kind(category.kind)?.unwrap_or_default();
        match categories.iter_mut().find(|c| {
            c.standardized_name.eq_ignore_ascii_case(&category.standardized_name)
        }) {
            Some(existing) => *existing = category.clone(),
            None => categories.push(category.clone()),
        }
        self.save_kind(category.kind, &categories)?;
        Ok(())
    }
}
