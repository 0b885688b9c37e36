//! Weight vector computation for the three blend methods.

use std::collections::BTreeMap;

use tracing::warn;

use survey_model::{BlendMethod, SurveyRow};

/// A normalized weight vector for a row selection.
///
/// `values` has one entry per selected row and sums to 1.0 within float
/// tolerance. `degraded` is set when the requested method had no usable
/// weight signal and fell back to equal weighting; that fallback is a
/// warning, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendWeights {
    pub values: Vec<f64>,
    pub degraded: bool,
}

impl BlendWeights {
    fn equal(count: usize) -> Self {
        Self {
            values: vec![1.0 / count as f64; count],
            degraded: false,
        }
    }

    fn degraded_equal(count: usize) -> Self {
        Self {
            values: vec![1.0 / count as f64; count],
            degraded: true,
        }
    }
}

/// Computes the weight vector for `rows` under `method`.
///
/// - `simple`: every row weighted `1/N`.
/// - `weighted`: proportional to row incumbent counts; a selection with no
///   incumbent data anywhere degrades to `simple`.
/// - `custom`: proportional to `custom_weights` (keyed by row index; absent
///   rows contribute nothing); an all-zero map degrades to `simple`.
///
/// Returns an empty vector for an empty selection; the aggregator rejects
/// that case itself.
#[must_use]
pub fn compute_weights(
    method: BlendMethod,
    rows: &[SurveyRow],
    custom_weights: Option<&BTreeMap<usize, f64>>,
) -> BlendWeights {
    if rows.is_empty() {
        return BlendWeights {
            values: Vec::new(),
            degraded: false,
        };
    }
    match method {
        BlendMethod::Simple => BlendWeights::equal(rows.len()),
        BlendMethod::Weighted => incumbent_weights(rows),
        BlendMethod::Custom => custom_weight_vector(rows.len(), custom_weights),
    }
}

fn incumbent_weights(rows: &[SurveyRow]) -> BlendWeights {
    let counts: Vec<f64> = rows.iter().map(|r| f64::from(r.incumbent_count())).collect();
    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        warn!("no incumbent data on any selected row; falling back to equal weighting");
        return BlendWeights::degraded_equal(rows.len());
    }
    BlendWeights {
        values: counts.iter().map(|c| c / total).collect(),
        degraded: false,
    }
}

fn custom_weight_vector(
    count: usize,
    custom_weights: Option<&BTreeMap<usize, f64>>,
) -> BlendWeights {
    let raw: Vec<f64> = (0..count)
        .map(|index| {
            custom_weights
                .and_then(|weights| weights.get(&index))
                .copied()
                .unwrap_or(0.0)
                .max(0.0)
        })
        .collect();
    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        warn!("custom weights sum to zero; falling back to equal weighting");
        return BlendWeights::degraded_equal(count);
    }
    BlendWeights {
        values: raw.iter().map(|w| w / total).collect(),
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::MetricObservation;

    fn row(incumbents: u32) -> SurveyRow {
        SurveyRow {
            specialty: "Cardiology".into(),
            provider_type: "Physician".into(),
            geographic_region: "National".into(),
            vendor: "MGMA".into(),
            year: 2025,
            tcc: MetricObservation {
                p25: 250_000.0,
                p50: 300_000.0,
                p75: 360_000.0,
                p90: 420_000.0,
                org_count: 10,
                incumbent_count: incumbents,
            },
            wrvu: MetricObservation::default(),
            cf: MetricObservation::default(),
        }
    }

    fn assert_normalized(weights: &BlendWeights) {
        let sum: f64 = weights.values.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");
        assert!(weights.values.iter().all(|w| *w >= 0.0));
    }

    #[test]
    fn simple_is_equal_split() {
        let rows = vec![row(10), row(20), row(30)];
        let weights = compute_weights(BlendMethod::Simple, &rows, None);
        assert_eq!(weights.values, vec![1.0 / 3.0; 3]);
        assert!(!weights.degraded);
        assert_normalized(&weights);
    }

    #[test]
    fn weighted_follows_incumbents() {
        let rows = vec![row(135), row(28), row(43)];
        let weights = compute_weights(BlendMethod::Weighted, &rows, None);
        assert_normalized(&weights);
        assert!((weights.values[0] - 135.0 / 206.0).abs() < 1e-12);
        assert!((weights.values[1] - 28.0 / 206.0).abs() < 1e-12);
        assert!((weights.values[2] - 43.0 / 206.0).abs() < 1e-12);
    }

    #[test]
    fn weighted_without_incumbents_degrades_to_simple() {
        let rows = vec![row(0), row(0), row(0)];
        let weighted = compute_weights(BlendMethod::Weighted, &rows, None);
        let simple = compute_weights(BlendMethod::Simple, &rows, None);
        assert_eq!(weighted.values, simple.values);
        assert!(weighted.degraded);
    }

    #[test]
    fn custom_normalizes_and_defaults_missing_to_zero() {
        let rows = vec![row(1), row(1), row(1)];
        let mut custom = BTreeMap::new();
        custom.insert(0, 60.0);
        custom.insert(2, 20.0);
        let weights = compute_weights(BlendMethod::Custom, &rows, Some(&custom));
        assert_normalized(&weights);
        assert!((weights.values[0] - 0.75).abs() < 1e-12);
        assert_eq!(weights.values[1], 0.0);
        assert!((weights.values[2] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn custom_all_zero_degrades_to_simple() {
        let rows = vec![row(1), row(1)];
        let weights = compute_weights(BlendMethod::Custom, &rows, Some(&BTreeMap::new()));
        assert_eq!(weights.values, vec![0.5, 0.5]);
        assert!(weights.degraded);
    }

    #[test]
    fn empty_selection_yields_empty_vector() {
        let weights = compute_weights(BlendMethod::Weighted, &[], None);
        assert!(weights.values.is_empty());
    }
}
