use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result, bail};
use tracing::info;

use survey_blend::{aggregate, compute_weights};
use survey_ingest::{IngestOptions, IngestedSurvey, read_survey_csv};
use survey_map::{AutoMapper, CategoryRepository};
use survey_model::{BlendMethod, CategoryKind, MapperConfig, SurveyRow};

use crate::cli::{BlendArgs, CategoriesArgs, MapArgs};
use crate::types::{BlendResult, CategoriesResult, KindListing, LabelSuggestions, MapResult};

pub fn run_map(args: &MapArgs) -> Result<MapResult> {
    let repository = CategoryRepository::new(&args.mappings)
        .with_context(|| format!("open mapping repository {}", args.mappings.display()))?;
    let mut store = repository.load_store().context("load confirmed mappings")?;

    let ingested = ingest(&args.survey, args.vendor.clone(), args.year)?;
    let kind = CategoryKind::from(args.kind);
    let observed = ingested.observed.of_kind(kind);

    let distinct_observed = observed
        .iter()
        .filter(|s| !s.label.trim().is_empty() && !s.vendor.trim().is_empty())
        .map(|s| (s.label.to_ascii_lowercase(), s.vendor.to_ascii_lowercase()))
        .collect::<BTreeSet<_>>()
        .len();
    let unmapped = store.unmapped_labels(kind, observed);
    let already_mapped = distinct_observed - unmapped.len();
    info!(
        kind = %kind,
        observed = distinct_observed,
        unmapped = unmapped.len(),
        "diffed observed labels against confirmed mappings"
    );

    let config = MapperConfig {
        use_string_matching: !args.no_string_matching,
        use_synonyms: !args.no_synonyms,
        confidence_threshold: args.threshold,
    };
    let mapper = AutoMapper::new(config);

    if args.apply {
        let outcome = mapper.auto_map_all(&unmapped, kind, &mut store, &repository);
        let has_errors = !outcome.failures.is_empty();
        Ok(MapResult {
            kind,
            already_mapped,
            suggestions: Vec::new(),
            applied: outcome.applied,
            unmatched: outcome.unmatched,
            failures: outcome.failures,
            has_errors,
        })
    } else {
        let suggestions = unmapped
            .into_iter()
            .map(|label| {
                let suggestions = mapper.suggest_display(&label, kind, &store);
                LabelSuggestions { label, suggestions }
            })
            .collect();
        Ok(MapResult {
            kind,
            already_mapped,
            suggestions,
            applied: Vec::new(),
            unmatched: Vec::new(),
            failures: Vec::new(),
            has_errors: false,
        })
    }
}

pub fn run_blend(args: &BlendArgs) -> Result<BlendResult> {
    let ingested = ingest(&args.survey, args.vendor.clone(), args.year)?;
    let rows = select_rows(ingested.rows, args);
    if rows.is_empty() {
        bail!("no survey rows match the requested filters");
    }

    let method = BlendMethod::from(args.method);
    let custom = match &args.weights {
        Some(raw) => Some(parse_weight_pairs(raw)?),
        None => None,
    };
    let weights = compute_weights(method, &rows, custom.as_ref());
    let result = aggregate(&rows, &weights, method).context("aggregate blend")?;
    Ok(BlendResult {
        result,
        degraded: weights.degraded,
        row_count: rows.len(),
    })
}

pub fn run_categories(args: &CategoriesArgs) -> Result<CategoriesResult> {
    let repository = CategoryRepository::new(&args.mappings)
        .with_context(|| format!("open mapping repository {}", args.mappings.display()))?;
    let wanted: Option<CategoryKind> = args.kind.map(CategoryKind::from);

    let mut listings = Vec::new();
    for entry in repository.list().context("list mapping repository")? {
        if wanted.is_some_and(|kind| kind != entry.kind) {
            continue;
        }
        let categories = repository
            .load_kind(entry.kind)
            .with_context(|| format!("load {} mappings", entry.kind))?
            .unwrap_or_default();
        listings.push(KindListing { entry, categories });
    }
    Ok(CategoriesResult { listings })
}

fn ingest(
    path: &std::path::Path,
    vendor: Option<String>,
    year: Option<u16>,
) -> Result<IngestedSurvey> {
    let options = IngestOptions {
        source_id: path.display().to_string(),
        vendor,
        year,
    };
    read_survey_csv(path, &options)
        .with_context(|| format!("ingest survey export {}", path.display()))
}

fn select_rows(rows: Vec<SurveyRow>, args: &BlendArgs) -> Vec<SurveyRow> {
    rows.into_iter()
        .filter(|row| {
            if !args.specialties.is_empty()
                && !args
                    .specialties
                    .iter()
                    .any(|s| row.specialty.eq_ignore_ascii_case(s))
            {
                return false;
            }
            if let Some(vendor) = &args.vendor {
                if !row.vendor.eq_ignore_ascii_case(vendor) {
                    return false;
                }
            }
            if let Some(year) = args.year {
                if row.year != year {
                    return false;
                }
            }
            if let Some(region) = &args.region {
                if !row.geographic_region.eq_ignore_ascii_case(region) {
                    return false;
                }
            }
            if let Some(provider_type) = &args.provider_type {
                if !row.provider_type.eq_ignore_ascii_case(provider_type) {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Parses "0=60,1=40" into a row-index keyed weight map.
fn parse_weight_pairs(raw: &str) -> Result<BTreeMap<usize, f64>> {
    let mut weights = BTreeMap::new();
    for pair in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let (index, weight) = pair
            .split_once('=')
            .with_context(|| format!("weight pair {pair:?} is not index=weight"))?;
        let index: usize = index
            .trim()
            .parse()
            .with_context(|| format!("invalid row index in weight pair {pair:?}"))?;
        let weight: f64 = weight
            .trim()
            .parse()
            .with_context(|| format!("invalid weight in weight pair {pair:?}"))?;
        if weight < 0.0 {
            bail!("weight for row {index} is negative");
        }
        if weights.insert(index, weight).is_some() {
            bail!("row {index} appears twice in --weights");
        }
    }
    Ok(weights)
}
