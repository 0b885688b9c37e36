//! CSV reading into canonical survey rows.

use std::path::Path;

use sha2::Digest;
use tracing::{debug, info};

use survey_model::{CategoryKind, MetricObservation, SourceLabel, SurveyRow};

use crate::error::IngestError;
use crate::header::{StatField, SurveyField, resolve_header};

/// Options for one ingest pass.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Stable source identifier for row-id derivation (e.g. the file path).
    pub source_id: String,
    /// Vendor to assume when the export has no vendor column.
    pub vendor: Option<String>,
    /// Survey year to assume when the export has no year column.
    pub year: Option<u16>,
}

impl IngestOptions {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            vendor: None,
            year: None,
        }
    }
}

/// Raw labels observed during ingestion, per category kind.
///
/// Specialty, provider-type, and region labels come from row values, one
/// entry per occurrence so the unmapped-label diff can count them. Column
/// labels are the headers this crate did not recognize.
#[derive(Debug, Clone, Default)]
pub struct ObservedLabels {
    pub specialties: Vec<SourceLabel>,
    pub provider_types: Vec<SourceLabel>,
    pub regions: Vec<SourceLabel>,
    pub columns: Vec<SourceLabel>,
}

impl ObservedLabels {
    /// The observed labels for one category kind.
    #[must_use]
    pub fn of_kind(&self, kind: CategoryKind) -> &[SourceLabel] {
        match kind {
            CategoryKind::Specialty => &self.specialties,
            CategoryKind::ProviderType => &self.provider_types,
            CategoryKind::Region => &self.regions,
            CategoryKind::Column => &self.columns,
        }
    }
}

/// The result of ingesting one vendor export.
#[derive(Debug, Clone)]
pub struct IngestedSurvey {
    /// Normalized rows, in file order.
    pub rows: Vec<SurveyRow>,
    /// Deterministic per-row identifiers, parallel to `rows`.
    pub row_ids: Vec<String>,
    /// Raw labels seen during the pass, for the unmapped-label diff.
    pub observed: ObservedLabels,
    /// Headers that resolved to no canonical field.
    pub unrecognized_headers: Vec<String>,
    /// Records dropped for having no specialty value.
    pub skipped_rows: usize,
}

/// Reads a vendor survey export into canonical rows.
///
/// Headers are resolved through the alias tables in [`crate::header`];
/// unrecognized headers are reported, not fatal. Numeric cells tolerate
/// currency symbols, thousands separators, and the suppression markers
/// vendors use for thin cells (`-`, `*`, `N/A`), all of which ingest as a
/// missing observation.
pub fn read_survey_csv(
    path: &Path,
    options: &IngestOptions,
) -> Result<IngestedSurvey, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::csv(path, source))?;
    let headers = reader
        .headers()
        .map_err(|source| IngestError::csv(path, source))?
        .clone();

    let mut columns: Vec<Option<SurveyField>> = Vec::with_capacity(headers.len());
    let mut unrecognized_headers = Vec::new();
    for header in headers.iter() {
        let field = resolve_header(header);
        if field.is_none() && !header.is_empty() {
            unrecognized_headers.push(header.to_string());
        }
        columns.push(field);
    }

    let has_field = |wanted: SurveyField| columns.iter().flatten().any(|f| *f == wanted);
    if !has_field(SurveyField::Specialty) {
        return Err(IngestError::MissingColumn {
            path: path.to_path_buf(),
            field: "specialty",
        });
    }
    if options.vendor.is_none() && !has_field(SurveyField::Vendor) {
        return Err(IngestError::MissingColumn {
            path: path.to_path_buf(),
            field: "vendor",
        });
    }
    if options.year.is_none() && !has_field(SurveyField::Year) {
        return Err(IngestError::MissingColumn {
            path: path.to_path_buf(),
            field: "year",
        });
    }

    let mut rows = Vec::new();
    let mut row_ids = Vec::new();
    let mut observed = ObservedLabels::default();
    let mut skipped_rows = 0usize;

    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|source| IngestError::csv(path, source))?;
        let record_number = (idx as u64) + 1;
        // Header occupies line 1.
        let line = record_number + 1;

        let mut row = SurveyRow {
            specialty: String::new(),
            provider_type: String::new(),
            geographic_region: String::new(),
            vendor: options.vendor.clone().unwrap_or_default(),
            year: options.year.unwrap_or_default(),
            tcc: MetricObservation::default(),
            wrvu: MetricObservation::default(),
            cf: MetricObservation::default(),
        };

        for ((field, header), value) in columns.iter().zip(headers.iter()).zip(record.iter()) {
            let Some(field) = field else { continue };
            match field {
                SurveyField::Specialty => assign_text(&mut row.specialty, value),
                SurveyField::ProviderType => assign_text(&mut row.provider_type, value),
                SurveyField::Region => assign_text(&mut row.geographic_region, value),
                SurveyField::Vendor => assign_text(&mut row.vendor, value),
                SurveyField::Year => {
                    if !value.is_empty() {
                        row.year = value.parse().map_err(|_| IngestError::InvalidYear {
                            value: value.to_string(),
                            line,
                        })?;
                    }
                }
                SurveyField::Stat { metric, stat } => {
                    let parsed =
                        parse_number(value).ok_or_else(|| IngestError::InvalidNumber {
                            column: header.to_string(),
                            value: value.to_string(),
                            line,
                        })?;
                    apply_stat(row.observation_mut(*metric), *stat, parsed);
                }
            }
        }

        if row.specialty.is_empty() {
            debug!(line, "skipping record with no specialty");
            skipped_rows += 1;
            continue;
        }

        observed.specialties.push(SourceLabel {
            label: row.specialty.clone(),
            vendor: row.vendor.clone(),
        });
        if !row.provider_type.is_empty() {
            observed.provider_types.push(SourceLabel {
                label: row.provider_type.clone(),
                vendor: row.vendor.clone(),
            });
        }
        if !row.geographic_region.is_empty() {
            observed.regions.push(SourceLabel {
                label: row.geographic_region.clone(),
                vendor: row.vendor.clone(),
            });
        }

        row_ids.push(derive_row_id(&options.source_id, record_number));
        rows.push(row);
    }

    let file_vendor = options
        .vendor
        .clone()
        .or_else(|| rows.first().map(|r| r.vendor.clone()))
        .unwrap_or_default();
    for header in &unrecognized_headers {
        observed.columns.push(SourceLabel {
            label: header.clone(),
            vendor: file_vendor.clone(),
        });
    }

    info!(
        path = %path.display(),
        rows = rows.len(),
        skipped = skipped_rows,
        unrecognized_headers = unrecognized_headers.len(),
        "ingested survey export"
    );

    Ok(IngestedSurvey {
        rows,
        row_ids,
        observed,
        unrecognized_headers,
        skipped_rows,
    })
}

fn assign_text(target: &mut String, value: &str) {
    if !value.is_empty() {
        *target = value.to_string();
    }
}

fn apply_stat(observation: &mut MetricObservation, stat: StatField, value: f64) {
    match stat {
        StatField::P25 => observation.p25 = value,
        StatField::P50 => observation.p50 = value,
        StatField::P75 => observation.p75 = value,
        StatField::P90 => observation.p90 = value,
        StatField::OrgCount => observation.org_count = clamp_count(value),
        StatField::IncumbentCount => observation.incumbent_count = clamp_count(value),
    }
}

fn clamp_count(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else {
        value.round() as u32
    }
}

/// Parses one numeric cell, tolerating vendor formatting.
///
/// Currency symbols, thousands separators, and percent signs are stripped;
/// an empty cell or a suppression marker parses as `0.0` (a missing
/// observation). Returns `None` only for genuinely malformed input.
fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty() || is_suppression_marker(raw) {
        return Some(0.0);
    }
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() || is_suppression_marker(&cleaned) {
        return Some(0.0);
    }
    cleaned.parse().ok()
}

fn is_suppression_marker(value: &str) -> bool {
    matches!(value, "-" | "--" | "*" | "**")
        || value.eq_ignore_ascii_case("na")
        || value.eq_ignore_ascii_case("n/a")
}

fn derive_row_id(source_id: &str, record_number: u64) -> String {
    // Deterministic: sha256("<source_id>\0<record_number>"), first 16 bytes
    // rendered as hex.
    let mut hasher = sha2::Sha256::new();
    hasher.update(source_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(record_number.to_string().as_bytes());
    let digest = hasher.finalize();
    digest[..16].iter().map(|byte| format!("{byte:02x}")).collect()
}
