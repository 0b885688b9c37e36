//! Weighted percentile aggregation across a row selection.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use survey_model::{BlendMethod, BlendedMetric, BlendedResult, Metric, SurveyRow};

use crate::error::BlendError;
use crate::weights::{BlendWeights, compute_weights};

/// Incumbent volume per specialty at which the sample-size score saturates.
const FULL_CONFIDENCE_RECORDS: f64 = 100.0;

/// Rounds to 2 decimal places, half away from zero.
///
/// `f64::round` rounds halfway cases away from zero, which is the behavior
/// the percentile outputs are specified with (not banker's rounding).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the blended result for already-normalized weights.
///
/// Each percentile output is `Σ row[field] · weight[row]` with incomplete
/// observations contributing zero (the row itself stays in the selection),
/// rounded to 2 decimals. `total_records` sums organization counts
/// unweighted. A selection where no row reports a metric yields zeros for
/// that metric; that is a representable "no data" result, not an error.
pub fn aggregate(
    rows: &[SurveyRow],
    weights: &BlendWeights,
    method: BlendMethod,
) -> Result<BlendedResult, BlendError> {
    if rows.is_empty() {
        return Err(BlendError::EmptySelection);
    }
    if weights.values.len() != rows.len() {
        return Err(BlendError::WeightLengthMismatch {
            rows: rows.len(),
            weights: weights.values.len(),
        });
    }
    if let Some((index, value)) = weights
        .values
        .iter()
        .enumerate()
        .find(|(_, w)| **w < 0.0)
    {
        return Err(BlendError::NegativeWeight {
            index,
            value: value.to_string(),
        });
    }

    let tcc = blended_metric(rows, &weights.values, Metric::Tcc);
    let wrvu = blended_metric(rows, &weights.values, Metric::Wrvu);
    let cf = blended_metric(rows, &weights.values, Metric::Cf);

    let total_records: u32 = rows.iter().map(SurveyRow::org_count).sum();
    let specialties = distinct_specialties(rows);
    let confidence = confidence_score(rows, total_records, specialties.len());

    debug!(
        rows = rows.len(),
        specialties = specialties.len(),
        total_records,
        confidence,
        "aggregated blend"
    );

    Ok(BlendedResult {
        tcc,
        wrvu,
        cf,
        total_records,
        confidence,
        specialties,
        method,
    })
}

/// The full blend surface: weights plus aggregation in one call.
///
/// Degraded weighting (no incumbent data, all-zero custom weights) is
/// logged and the blend proceeds with equal weights.
pub fn compute_blend(
    rows: &[SurveyRow],
    method: BlendMethod,
    custom_weights: Option<&BTreeMap<usize, f64>>,
) -> Result<BlendedResult, BlendError> {
    if rows.is_empty() {
        return Err(BlendError::EmptySelection);
    }
    let weights = compute_weights(method, rows, custom_weights);
    if weights.degraded {
        warn!(method = %method, "blend proceeding with equal weights");
    }
    aggregate(rows, &weights, method)
}

fn blended_metric(rows: &[SurveyRow], weights: &[f64], metric: Metric) -> BlendedMetric {
    let mut blended = BlendedMetric::default();
    for (row, weight) in rows.iter().zip(weights) {
        let observation = row.observation(metric);
        if !observation.is_complete() {
            continue;
        }
        blended.p25 += observation.p25 * weight;
        blended.p50 += observation.p50 * weight;
        blended.p75 += observation.p75 * weight;
        blended.p90 += observation.p90 * weight;
    }
    BlendedMetric {
        p25: round2(blended.p25),
        p50: round2(blended.p50),
        p75: round2(blended.p75),
        p90: round2(blended.p90),
    }
}

fn distinct_specialties(rows: &[SurveyRow]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut specialties = Vec::new();
    for row in rows {
        if seen.insert(row.specialty.to_ascii_lowercase()) {
            specialties.push(row.specialty.clone());
        }
    }
    specialties
}

/// Unweighted average of a sample-size score and a completeness score,
/// each clamped to [0, 1].
fn confidence_score(rows: &[SurveyRow], total_records: u32, specialty_count: usize) -> f64 {
    let sample_score = if specialty_count == 0 {
        0.0
    } else {
        let average = f64::from(total_records) / specialty_count as f64;
        (average / FULL_CONFIDENCE_RECORDS).clamp(0.0, 1.0)
    };
    let complete = rows.iter().filter(|r| r.is_fully_reported()).count();
    let completeness = (complete as f64 / rows.len() as f64).clamp(0.0, 1.0);
    (sample_score + completeness) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(335_529.125), 335_529.13);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(123.456), 123.46);
    }
}
