//! Auto-mapping engine implementation.

use tracing::{debug, info};

use survey_model::{
    CanonicalCategory, CategoryKind, MapperConfig, MappingSuggestion, UnmappedLabel,
};

use crate::score::similarity;
use crate::store::CategoryStore;
use crate::synonyms::SynonymTable;

/// Confidence floor applied when a synonym ties a label to a category.
///
/// Deliberately a floor (`max(current, 0.8)`), never blended with the
/// string-similarity score: changing this changes which labels clear the
/// auto-accept threshold.
const SYNONYM_FLOOR: f64 = 0.8;
/// Minimum confidence for a suggestion to be returned at all.
const DISPLAY_FLOOR: f64 = 0.3;
/// Cap on suggestions surfaced for interactive display.
const MAX_DISPLAY_SUGGESTIONS: usize = 5;

/// Outcome of resolving one label against the store before suggesting.
#[derive(Debug, Clone)]
pub enum MappingResolution {
    /// The `(label, vendor)` pair is already confirmed under this category.
    Resolved(String),
    /// Ranked candidates for manual confirmation (possibly empty; an empty
    /// list is a normal outcome, not an error).
    Suggestions(Vec<MappingSuggestion>),
}

/// One label auto-accepted during a bulk pass.
#[derive(Debug, Clone)]
pub struct AppliedMapping {
    pub label: UnmappedLabel,
    pub standardized_name: String,
    pub confidence: f64,
}

/// One label whose confirmed mapping could not be persisted.
#[derive(Debug, Clone)]
pub struct MappingFailure {
    pub label: UnmappedLabel,
    pub standardized_name: String,
    pub reason: String,
}

/// Result of a bulk auto-map pass.
#[derive(Debug, Clone, Default)]
pub struct AutoMapResult {
    /// Labels confirmed and persisted under an existing category.
    pub applied: Vec<AppliedMapping>,
    /// Labels left for manual handling (no suggestion cleared the threshold).
    pub unmatched: Vec<UnmappedLabel>,
    /// Labels whose persistence failed; the rest of the batch is unaffected.
    pub failures: Vec<MappingFailure>,
}

/// Persistence seam for confirmed mappings.
///
/// The engine never touches storage directly; bulk auto-mapping pushes each
/// updated category through this trait so the caller decides where
/// confirmed mappings live.
pub trait MappingSaver {
    fn save_mapping(&self, category: &CanonicalCategory) -> anyhow::Result<()>;
}

/// A saver that keeps mappings in memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSaver;

impl MappingSaver for NoopSaver {
    fn save_mapping(&self, _category: &CanonicalCategory) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Engine for mapping raw vendor labels to canonical categories.
///
/// Produces ranked candidate categories with confidence scores for one
/// unmapped label at a time. Auto-accept decisions are the caller's:
/// [`AutoMapper::suggest`] only ranks, while [`AutoMapper::auto_map_all`]
/// applies the configured threshold across a whole batch.
#[derive(Debug, Clone)]
pub struct AutoMapper {
    config: MapperConfig,
    synonyms: SynonymTable,
}

impl AutoMapper {
    /// Creates an engine with the built-in synonym table.
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Self {
            config,
            synonyms: SynonymTable::default(),
        }
    }

    /// Creates an engine with a caller-supplied synonym table.
    #[must_use]
    pub fn with_synonyms(config: MapperConfig, synonyms: SynonymTable) -> Self {
        Self { config, synonyms }
    }

    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Ranks candidate categories for one unmapped label.
    ///
    /// Each category's confidence is the maximum of its standardized name's
    /// similarity to the label, the best similarity across its confirmed
    /// source labels, and the synonym floor when the table ties the two
    /// together. Categories below the display floor are dropped. The sort
    /// is stable and descending, so equal scores keep confirmation order.
    #[must_use]
    pub fn suggest(
        &self,
        label: &UnmappedLabel,
        kind: CategoryKind,
        store: &CategoryStore,
    ) -> Vec<MappingSuggestion> {
        let mut suggestions: Vec<MappingSuggestion> = store
            .of_kind(kind)
            .filter_map(|category| {
                let confidence = self.category_confidence(&label.name, category);
                if confidence >= DISPLAY_FLOOR {
                    Some(MappingSuggestion {
                        standardized_name: category.standardized_name.clone(),
                        confidence,
                    })
                } else {
                    None
                }
            })
            .collect();
        suggestions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        debug!(
            label = %label.name,
            vendor = %label.vendor,
            candidates = suggestions.len(),
            "ranked mapping suggestions"
        );
        suggestions
    }

    /// Like [`Self::suggest`], capped for interactive display.
    #[must_use]
    pub fn suggest_display(
        &self,
        label: &UnmappedLabel,
        kind: CategoryKind,
        store: &CategoryStore,
    ) -> Vec<MappingSuggestion> {
        let mut suggestions = self.suggest(label, kind, store);
        suggestions.truncate(MAX_DISPLAY_SUGGESTIONS);
        suggestions
    }

    /// Store lookup first, suggestions only as a fallback.
    #[must_use]
    pub fn resolve_or_suggest(
        &self,
        label: &UnmappedLabel,
        kind: CategoryKind,
        store: &CategoryStore,
    ) -> MappingResolution {
        if let Some(category) = store.resolve(kind, &label.name, &label.vendor) {
            return MappingResolution::Resolved(category.standardized_name.clone());
        }
        MappingResolution::Suggestions(self.suggest(label, kind, store))
    }

    /// Auto-maps a whole batch of unmapped labels.
    ///
    /// Suggestions are computed against a snapshot taken before any write,
    /// so each label's outcome is independent of batch order. Labels whose
    /// top suggestion clears the configured threshold are appended as
    /// confirmed source labels under the matched category and pushed through
    /// `saver`; a failed save is reported for that label alone and the batch
    /// continues.
    pub fn auto_map_all(
        &self,
        labels: &[UnmappedLabel],
        kind: CategoryKind,
        store: &mut CategoryStore,
        saver: &dyn MappingSaver,
    ) -> AutoMapResult {
        let snapshot = store.clone();
        let mut result = AutoMapResult::default();
        let mut planned: Vec<(UnmappedLabel, String, f64)> = Vec::new();

        for label in labels {
            let suggestions = self.suggest(label, kind, &snapshot);
            match suggestions.first() {
                Some(top) if top.confidence >= self.config.confidence_threshold => {
                    planned.push((label.clone(), top.standardized_name.clone(), top.confidence));
                }
                _ => result.unmatched.push(label.clone()),
            }
        }

        for (label, standardized_name, confidence) in planned {
            let Some(category) = store.find(kind, &standardized_name) else {
                // Matched against a snapshot category that was since removed.
                result.unmatched.push(label);
                continue;
            };
            let mut updated = category.clone();
            if let Err(error) = updated.add_source_label(&label.name, &label.vendor) {
                result.failures.push(MappingFailure {
                    label,
                    standardized_name,
                    reason: error.to_string(),
                });
                continue;
            }
            match saver.save_mapping(&updated) {
                Ok(()) => {
                    store.upsert(updated);
                    result.applied.push(AppliedMapping {
                        label,
                        standardized_name,
                        confidence,
                    });
                }
                Err(error) => result.failures.push(MappingFailure {
                    label,
                    standardized_name,
                    reason: error.to_string(),
                }),
            }
        }

        info!(
            kind = %kind,
            applied = result.applied.len(),
            unmatched = result.unmatched.len(),
            failures = result.failures.len(),
            "bulk auto-map complete"
        );
        result
    }

    fn category_confidence(&self, label: &str, category: &CanonicalCategory) -> f64 {
        let mut confidence: f64 = 0.0;
        if self.config.use_string_matching {
            confidence = similarity(label, &category.standardized_name);
            for source in &category.source_labels {
                confidence = confidence.max(similarity(label, &source.label));
            }
        }
        if self.config.use_synonyms
            && confidence < SYNONYM_FLOOR
            && self.synonyms.label_matches_category(&category.standardized_name, label)
        {
            confidence = SYNONYM_FLOOR;
        }
        confidence
    }
}
