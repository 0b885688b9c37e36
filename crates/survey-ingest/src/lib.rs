//! Vendor survey export ingestion.
//!
//! The adapter between raw spreadsheet exports and the canonical row shape
//! the mapping and blending engines consume. All "guess the field name"
//! lenience lives here: header aliasing, currency-tolerant number parsing,
//! and extraction of the raw labels the unmapped-label diff runs against.
//! Downstream code never sees vendor spelling.

pub mod error;
pub mod header;
pub mod reader;

pub use error::IngestError;
pub use header::{StatField, SurveyField, resolve_header};
pub use reader::{IngestOptions, IngestedSurvey, ObservedLabels, read_survey_csv};
