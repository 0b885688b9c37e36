//! Header normalization for messy vendor exports.
//!
//! Every vendor spells the same logical column its own way (`region`,
//! `Region`, `geographic_region`; `tcc_p50`, `TCC 50th Percentile`,
//! `Total Cash Comp - Median`). Resolution happens once per file here, so
//! the rest of the crate and the engines downstream only ever see the
//! canonical row shape.

use survey_model::Metric;

/// A per-metric statistic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    P25,
    P50,
    P75,
    P90,
    OrgCount,
    IncumbentCount,
}

/// The canonical field a vendor header resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyField {
    Specialty,
    ProviderType,
    Region,
    Vendor,
    Year,
    Stat { metric: Metric, stat: StatField },
}

const SPECIALTY_ALIASES: &[&str] = &[
    "specialty",
    "specialtyname",
    "specialtydescription",
    "physicianspecialty",
    "benchmarkspecialty",
];
const PROVIDER_TYPE_ALIASES: &[&str] = &[
    "providertype",
    "provider",
    "providercategory",
    "stafftype",
    "position",
];
const REGION_ALIASES: &[&str] = &[
    "region",
    "geographicregion",
    "georegion",
    "censusregion",
    "geography",
];
const VENDOR_ALIASES: &[&str] = &[
    "vendor",
    "surveyvendor",
    "surveysource",
    "survey",
    "source",
];
const YEAR_ALIASES: &[&str] = &["year", "surveyyear", "datayear"];

// Longest spellings first so "compperrvu" never stops at "comp". CF runs
// before TCC for the same reason.
const CF_PREFIXES: &[&str] = &[
    "conversionfactor",
    "compperwrvu",
    "compperrvu",
    "tccperwrvu",
    "cf",
];
const TCC_PREFIXES: &[&str] = &[
    "totalcashcompensation",
    "totalcashcomp",
    "totalcompensation",
    "totalcash",
    "totalcomp",
    "compensation",
    "tcc",
    "comp",
];
const WRVU_PREFIXES: &[&str] = &[
    "workrvus",
    "workrvu",
    "wrvus",
    "wrvu",
    "rvus",
    "rvu",
];

/// Resolves one raw header to its canonical field, if it has one.
///
/// Returns `None` for headers this tool does not track; callers surface
/// those for column mapping rather than failing the ingest.
#[must_use]
pub fn resolve_header(raw: &str) -> Option<SurveyField> {
    let compact = compact(raw);
    if compact.is_empty() {
        return None;
    }
    if SPECIALTY_ALIASES.contains(&compact.as_str()) {
        return Some(SurveyField::Specialty);
    }
    if PROVIDER_TYPE_ALIASES.contains(&compact.as_str()) {
        return Some(SurveyField::ProviderType);
    }
    if REGION_ALIASES.contains(&compact.as_str()) {
        return Some(SurveyField::Region);
    }
    if VENDOR_ALIASES.contains(&compact.as_str()) {
        return Some(SurveyField::Vendor);
    }
    if YEAR_ALIASES.contains(&compact.as_str()) {
        return Some(SurveyField::Year);
    }
    resolve_stat_column(&compact)
}

fn resolve_stat_column(compact: &str) -> Option<SurveyField> {
    let prefix_tables = [
        (Metric::Cf, CF_PREFIXES),
        (Metric::Tcc, TCC_PREFIXES),
        (Metric::Wrvu, WRVU_PREFIXES),
    ];
    for (metric, prefixes) in prefix_tables {
        for prefix in prefixes {
            if let Some(rest) = compact.strip_prefix(prefix)
                && let Some(stat) = match_stat(rest)
            {
                return Some(SurveyField::Stat { metric, stat });
            }
        }
    }
    None
}

fn match_stat(rest: &str) -> Option<StatField> {
    match rest {
        "p25" | "25" | "25th" | "25thpercentile" | "25thpctl" => Some(StatField::P25),
        "p50" | "50" | "50th" | "50thpercentile" | "50thpctl" | "median" | "med" => {
            Some(StatField::P50)
        }
        "p75" | "75" | "75th" | "75thpercentile" | "75thpctl" => Some(StatField::P75),
        "p90" | "90" | "90th" | "90thpercentile" | "90thpctl" => Some(StatField::P90),
        "orgs" | "norgs" | "orgcount" | "organizations" | "norganizations" | "groups" => {
            Some(StatField::OrgCount)
        }
        "n" | "count" | "incumbents" | "incumbentcount" | "nincumbents" | "providers" => {
            Some(StatField::IncumbentCount)
        }
        _ => None,
    }
}

/// Lowercases and strips everything that is not ASCII alphanumeric.
fn compact(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_variants_resolve_to_one_field() {
        for header in ["region", "Region", "geographic_region", "Census Region"] {
            assert_eq!(resolve_header(header), Some(SurveyField::Region), "{header}");
        }
        for header in ["specialty", "Physician Specialty", "SPECIALTY_NAME"] {
            assert_eq!(resolve_header(header), Some(SurveyField::Specialty), "{header}");
        }
    }

    #[test]
    fn metric_stat_headers_resolve() {
        let cases = [
            ("tcc_p50", Metric::Tcc, StatField::P50),
            ("TCC 50th Percentile", Metric::Tcc, StatField::P50),
            ("Total Cash Comp - Median", Metric::Tcc, StatField::P50),
            ("wrvu_p90", Metric::Wrvu, StatField::P90),
            ("Work RVUs 25th", Metric::Wrvu, StatField::P25),
            ("cf_p75", Metric::Cf, StatField::P75),
            ("Conversion Factor Median", Metric::Cf, StatField::P50),
            ("tcc_n_orgs", Metric::Tcc, StatField::OrgCount),
            ("TCC Incumbents", Metric::Tcc, StatField::IncumbentCount),
        ];
        for (header, metric, stat) in cases {
            assert_eq!(
                resolve_header(header),
                Some(SurveyField::Stat { metric, stat }),
                "{header}"
            );
        }
    }

    #[test]
    fn comp_per_rvu_is_conversion_factor_not_tcc() {
        assert_eq!(
            resolve_header("Comp per RVU - Median"),
            Some(SurveyField::Stat {
                metric: Metric::Cf,
                stat: StatField::P50
            })
        );
    }

    #[test]
    fn untracked_headers_resolve_to_none() {
        for header in ["notes", "tcc_p40", "call_pay_p50", ""] {
            assert_eq!(resolve_header(header), None, "{header}");
        }
    }
}
