//! Auto-mapping of raw vendor labels to canonical categories.
//!
//! Survey vendors each ship their own vocabulary for the same specialty,
//! provider type, region, or metric column. This crate holds the engine
//! that ranks canonical-category candidates for an unmapped label, the
//! confirmed-mapping store it reads from, and a JSON repository for reuse
//! across sessions.
//!
//! # Design Philosophy
//!
//! - **Conservative**: similarity guards treat percentile suffixes
//!   (`tcc_p50` vs `tcc_p90`) and different letter content as different
//!   concepts, never near-matches.
//! - **Floors, not blends**: a synonym hit floors confidence at a fixed
//!   level instead of mixing scores.
//! - **Caller decides**: the engine ranks; auto-accept thresholds are
//!   applied by the bulk pass or by the caller, never inside `suggest`.
//! - **Injected state**: the store and saver are passed into every call;
//!   there are no module-level singletons.

pub mod engine;
pub mod error;
pub mod repository;
pub mod score;
pub mod store;
pub mod synonyms;

pub use engine::{
    AppliedMapping, AutoMapResult, AutoMapper, MappingFailure, MappingResolution, MappingSaver,
    NoopSaver,
};
pub use error::MapError;
pub use repository::{CategoryRepository, RepositoryEntry, StoredCategoryFile};
pub use score::{DataKind, similarity, similarity_with_hints};
pub use store::CategoryStore;
pub use synonyms::SynonymTable;
