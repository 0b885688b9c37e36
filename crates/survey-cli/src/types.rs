use survey_map::{AppliedMapping, MappingFailure, RepositoryEntry};
use survey_model::{
    BlendedResult, CanonicalCategory, CategoryKind, MappingSuggestion, UnmappedLabel,
};

/// Outcome of a `map` run.
#[derive(Debug)]
pub struct MapResult {
    pub kind: CategoryKind,
    /// Distinct observed labels already confirmed in the repository.
    pub already_mapped: usize,
    /// Ranked suggestions per unmapped label (suggest mode).
    pub suggestions: Vec<LabelSuggestions>,
    /// Labels confirmed and persisted (--apply mode).
    pub applied: Vec<AppliedMapping>,
    /// Labels left for manual mapping (--apply mode).
    pub unmatched: Vec<UnmappedLabel>,
    /// Labels whose persistence failed (--apply mode).
    pub failures: Vec<MappingFailure>,
    pub has_errors: bool,
}

/// One unmapped label with its ranked candidates.
#[derive(Debug)]
pub struct LabelSuggestions {
    pub label: UnmappedLabel,
    pub suggestions: Vec<MappingSuggestion>,
}

/// Outcome of a `blend` run.
#[derive(Debug)]
pub struct BlendResult {
    pub result: BlendedResult,
    /// The requested method fell back to equal weighting.
    pub degraded: bool,
    pub row_count: usize,
}

/// Outcome of a `categories` run.
#[derive(Debug)]
pub struct CategoriesResult {
    pub listings: Vec<KindListing>,
}

/// One stored kind with its categories.
#[derive(Debug)]
pub struct KindListing {
    pub entry: RepositoryEntry,
    pub categories: Vec<CanonicalCategory>,
}
