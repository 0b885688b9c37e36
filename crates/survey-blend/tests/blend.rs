use std::collections::BTreeMap;

use survey_blend::{BlendError, aggregate, compute_blend, compute_weights, round2};
use survey_model::{BlendMethod, MetricObservation, SurveyRow};

fn row(specialty: &str, tcc_p50: f64, incumbents: u32, orgs: u32) -> SurveyRow {
    SurveyRow {
        specialty: specialty.into(),
        provider_type: "Physician".into(),
        geographic_region: "National".into(),
        vendor: "MGMA".into(),
        year: 2025,
        tcc: MetricObservation {
            p25: tcc_p50 * 0.85,
            p50: tcc_p50,
            p75: tcc_p50 * 1.2,
            p90: tcc_p50 * 1.45,
            org_count: orgs,
            incumbent_count: incumbents,
        },
        wrvu: MetricObservation {
            p25: 4_200.0,
            p50: 5_000.0,
            p75: 5_900.0,
            p90: 6_800.0,
            org_count: orgs,
            incumbent_count: incumbents,
        },
        cf: MetricObservation {
            p25: 52.0,
            p50: 60.0,
            p75: 68.0,
            p90: 75.0,
            org_count: orgs,
            incumbent_count: incumbents,
        },
    }
}

fn three_specialty_selection() -> Vec<SurveyRow> {
    vec![
        row("Cardiology", 300_000.0, 135, 40),
        row("Cardiology - Invasive", 320_000.0, 28, 12),
        row("Electrophysiology", 450_000.0, 43, 18),
    ]
}

#[test]
fn weighted_scenario_matches_linear_formula() {
    let rows = three_specialty_selection();
    let weights = compute_weights(BlendMethod::Weighted, &rows, None);

    // incumbents 135 / 28 / 43 over a 206 total
    assert!((weights.values[0] - 0.655).abs() < 1e-3);
    assert!((weights.values[1] - 0.136).abs() < 1e-3);
    assert!((weights.values[2] - 0.209).abs() < 1e-3);

    let result = aggregate(&rows, &weights, BlendMethod::Weighted).expect("blend");
    let expected: f64 = rows
        .iter()
        .zip(&weights.values)
        .map(|(r, w)| r.tcc.p50 * w)
        .sum();
    assert_eq!(result.tcc.p50, round2(expected));
    assert_eq!(result.method, BlendMethod::Weighted);
}

#[test]
fn aggregation_is_linear_in_weights() {
    let rows = three_specialty_selection();
    let weights = compute_weights(BlendMethod::Simple, &rows, None);
    let result = aggregate(&rows, &weights, BlendMethod::Simple).expect("blend");

    let expected = round2((300_000.0 + 320_000.0 + 450_000.0) / 3.0);
    assert_eq!(result.tcc.p50, expected);
}

#[test]
fn total_records_sum_unweighted() {
    let rows = three_specialty_selection();
    let result = compute_blend(&rows, BlendMethod::Weighted, None).expect("blend");
    assert_eq!(result.total_records, 40 + 12 + 18);
    assert_eq!(result.specialties.len(), 3);
    assert_eq!(result.specialties[0], "Cardiology");
}

#[test]
fn incomplete_metric_contributes_zero_without_dropping_row() {
    let mut rows = three_specialty_selection();
    // Middle row reports no conversion factor.
    rows[1].cf = MetricObservation {
        org_count: rows[1].cf.org_count,
        incumbent_count: rows[1].cf.incumbent_count,
        ..MetricObservation::default()
    };
    let weights = compute_weights(BlendMethod::Simple, &rows, None);
    let result = aggregate(&rows, &weights, BlendMethod::Simple).expect("blend");

    // Two rows at 60.0 each under 1/3 weight; the incomplete row adds 0.
    assert_eq!(result.cf.p50, round2(60.0 * 2.0 / 3.0));
    // TCC is untouched by the missing CF observation.
    assert_eq!(
        result.tcc.p50,
        round2((300_000.0 + 320_000.0 + 450_000.0) / 3.0)
    );
}

#[test]
fn all_metrics_missing_yields_zeroes_and_zero_confidence() {
    let empty_obs = MetricObservation::default();
    let rows = vec![
        SurveyRow {
            specialty: "Cardiology".into(),
            provider_type: "Physician".into(),
            geographic_region: "National".into(),
            vendor: "MGMA".into(),
            year: 2025,
            tcc: empty_obs,
            wrvu: empty_obs,
            cf: empty_obs,
        };
        2
    ];
    let result = compute_blend(&rows, BlendMethod::Simple, None).expect("blend");
    assert_eq!(result.tcc.p50, 0.0);
    assert_eq!(result.wrvu.p90, 0.0);
    assert_eq!(result.cf.p25, 0.0);
    assert_eq!(result.total_records, 0);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn empty_selection_is_rejected() {
    let error = compute_blend(&[], BlendMethod::Simple, None).unwrap_err();
    assert_eq!(error, BlendError::EmptySelection);
}

#[test]
fn custom_weights_drive_the_blend() {
    let rows = three_specialty_selection();
    let mut custom = BTreeMap::new();
    custom.insert(0, 50.0);
    custom.insert(1, 50.0);
    // Row 2 is absent from the map and contributes nothing.
    let result = compute_blend(&rows, BlendMethod::Custom, Some(&custom)).expect("blend");
    assert_eq!(result.tcc.p50, round2((300_000.0 + 320_000.0) / 2.0));
}

#[test]
fn confidence_combines_sample_size_and_completeness() {
    let rows = three_specialty_selection();
    let result = compute_blend(&rows, BlendMethod::Simple, None).expect("blend");
    // 70 orgs over 3 distinct specialties, all rows fully reported:
    // sample = min(1, (70/3)/100), completeness = 1.0
    let expected = ((70.0 / 3.0 / 100.0) + 1.0) / 2.0;
    assert!((result.confidence - expected).abs() < 1e-12);
}

#[test]
fn duplicate_specialties_count_once_for_confidence() {
    let rows = vec![
        row("Cardiology", 300_000.0, 100, 60),
        row("CARDIOLOGY", 310_000.0, 100, 60),
    ];
    let result = compute_blend(&rows, BlendMethod::Simple, None).expect("blend");
    assert_eq!(result.specialties, vec!["Cardiology".to_string()]);
    // 120 orgs over 1 distinct specialty saturates the sample-size score.
    assert_eq!(result.confidence, 1.0);
}
