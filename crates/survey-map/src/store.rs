//! The confirmed-mapping store the auto-mapper reads from.
//!
//! Categories are held in confirmation order; the engine's tie-breaking on
//! equal confidence relies on that order being stable. The store is a plain
//! value passed into engine calls, never a module-level singleton, so a
//! batch can snapshot it by cloning.

use std::collections::BTreeMap;

use survey_model::{CanonicalCategory, CategoryKind, SourceLabel, UnmappedLabel};

use crate::error::MapError;

/// All confirmed mappings, across every category kind.
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<CanonicalCategory>,
}

impl CategoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-confirmed categories.
    ///
    /// Duplicate `(kind, name)` entries are rejected.
    pub fn from_categories(categories: Vec<CanonicalCategory>) -> Result<Self, MapError> {
        let mut store = Self::new();
        for category in categories {
            store.insert(category)?;
        }
        Ok(store)
    }

    /// All categories, in confirmation order.
    #[must_use]
    pub fn categories(&self) -> &[CanonicalCategory] {
        &self.categories
    }

    /// Categories of one kind, preserving confirmation order.
    pub fn of_kind(&self, kind: CategoryKind) -> impl Iterator<Item = &CanonicalCategory> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    /// Finds a category by kind and standardized name (case-insensitive).
    #[must_use]
    pub fn find(&self, kind: CategoryKind, name: &str) -> Option<&CanonicalCategory> {
        self.categories
            .iter()
            .find(|c| c.kind == kind && c.standardized_name.eq_ignore_ascii_case(name.trim()))
    }

    /// Adds a new category. Names must be unique within a kind.
    pub fn insert(&mut self, category: CanonicalCategory) -> Result<(), MapError> {
        if self.find(category.kind, &category.standardized_name).is_some() {
            return Err(MapError::DuplicateCategory {
                name: category.standardized_name,
                kind: category.kind,
            });
        }
        self.categories.push(category);
        Ok(())
    }

    /// Replaces a category in place, or appends it if absent.
    pub fn upsert(&mut self, category: CanonicalCategory) {
        match self
            .categories
            .iter_mut()
            .find(|c| c.kind == category.kind
                && c.standardized_name.eq_ignore_ascii_case(&category.standardized_name))
        {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    /// Resolves a raw `(label, vendor)` pair to its confirmed category.
    ///
    /// Callers try this before invoking the auto-mapper; a hit means the
    /// label needs no suggestion pass at all.
    #[must_use]
    pub fn resolve(&self, kind: CategoryKind, label: &str, vendor: &str) -> Option<&CanonicalCategory> {
        self.of_kind(kind).find(|c| c.has_source_label(label, vendor))
    }

    /// Records a user-confirmed mapping, creating the category on first use.
    pub fn confirm_mapping(
        &mut self,
        kind: CategoryKind,
        standardized_name: &str,
        label: &str,
        vendor: &str,
    ) -> Result<&CanonicalCategory, MapError> {
        let position = self.categories.iter().position(|c| {
            c.kind == kind && c.standardized_name.eq_ignore_ascii_case(standardized_name.trim())
        });
        let index = match position {
            Some(index) => index,
            None => {
                let category = CanonicalCategory::new(standardized_name.trim(), kind)?;
                self.categories.push(category);
                self.categories.len() - 1
            }
        };
        self.categories[index].add_source_label(label, vendor)?;
        Ok(&self.categories[index])
    }

    /// Removes a whole category. Returns false when it was not present.
    ///
    /// This is the only way a category shrinks; individual source labels
    /// are never removed.
    pub fn remove(&mut self, kind: CategoryKind, name: &str) -> bool {
        let before = self.categories.len();
        self.categories
            .retain(|c| !(c.kind == kind && c.standardized_name.eq_ignore_ascii_case(name.trim())));
        self.categories.len() != before
    }

    /// Diffs observed labels against the confirmed mappings.
    ///
    /// Labels are deduplicated case-insensitively per `(name, vendor)` with
    /// occurrence counts; blank labels are skipped; anything resolving via
    /// [`Self::resolve`] is already mapped and excluded.
    #[must_use]
    pub fn unmapped_labels(
        &self,
        kind: CategoryKind,
        observed: &[SourceLabel],
    ) -> Vec<UnmappedLabel> {
        let mut seen: BTreeMap<(String, String), UnmappedLabel> = BTreeMap::new();
        for source in observed {
            let name = source.label.trim();
            if name.is_empty() || source.vendor.trim().is_empty() {
                continue;
            }
            if self.resolve(kind, name, &source.vendor).is_some() {
                continue;
            }
            let key = (name.to_ascii_lowercase(), source.vendor.to_ascii_lowercase());
            match seen.get_mut(&key) {
                Some(existing) => existing.occurrence_count += 1,
                None => {
                    if let Ok(label) = UnmappedLabel::new(name, source.vendor.clone()) {
                        seen.insert(key, label);
                    }
                }
            }
        }
        seen.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_cardiology() -> CategoryStore {
        let mut store = CategoryStore::new();
        store
            .confirm_mapping(
                CategoryKind::Specialty,
                "Cardiology",
                "Cardiovascular Disease",
                "MGMA",
            )
            .unwrap();
        store
    }

    #[test]
    fn resolve_is_vendor_scoped() {
        let store = store_with_cardiology();
        assert!(
            store
                .resolve(CategoryKind::Specialty, "Cardiovascular Disease", "MGMA")
                .is_some()
        );
        // Same label from another vendor is still unmapped.
        assert!(
            store
                .resolve(CategoryKind::Specialty, "Cardiovascular Disease", "AMGA")
                .is_none()
        );
    }

    #[test]
    fn duplicate_names_rejected_within_kind() {
        let mut store = store_with_cardiology();
        let dup = CanonicalCategory::new("cardiology", CategoryKind::Specialty).unwrap();
        assert!(matches!(
            store.insert(dup),
            Err(MapError::DuplicateCategory { .. })
        ));
        // Same name under a different kind is fine.
        let col = CanonicalCategory::new("Cardiology", CategoryKind::Column).unwrap();
        assert!(store.insert(col).is_ok());
    }

    #[test]
    fn unmapped_labels_dedupe_and_count() {
        let store = store_with_cardiology();
        let observed = vec![
            SourceLabel { label: "Ortho Surgery".into(), vendor: "MGMA".into() },
            SourceLabel { label: "ORTHO SURGERY".into(), vendor: "MGMA".into() },
            SourceLabel { label: "Cardiovascular Disease".into(), vendor: "MGMA".into() },
            SourceLabel { label: "  ".into(), vendor: "MGMA".into() },
        ];
        let unmapped = store.unmapped_labels(CategoryKind::Specialty, &observed);
        assert_eq!(unmapped.len(), 1);
        assert_eq!(unmapped[0].name, "Ortho Surgery");
        assert_eq!(unmapped[0].occurrence_count, 2);
    }

    #[test]
    fn remove_deletes_whole_category() {
        let mut store = store_with_cardiology();
        assert!(store.remove(CategoryKind::Specialty, "cardiology"));
        assert!(!store.remove(CategoryKind::Specialty, "cardiology"));
        assert!(store.categories().is_empty());
    }
}
