pub mod blend;
pub mod category;
pub mod error;
pub mod mapping;
pub mod survey;

pub use blend::{BlendMethod, BlendedMetric, BlendedResult, SpecialtyItem};
pub use category::{CanonicalCategory, CategoryKind, SourceLabel};
pub use error::{ModelError, Result};
pub use mapping::{MapperConfig, MappingSuggestion, UnmappedLabel};
pub use survey::{Metric, MetricObservation, SurveyRow};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_method_parses() {
        assert_eq!("Weighted".parse::<BlendMethod>().unwrap(), BlendMethod::Weighted);
        assert!("median".parse::<BlendMethod>().is_err());
    }

    #[test]
    fn category_serializes() {
        let mut cat = CanonicalCategory::new("Cardiology", CategoryKind::Specialty).unwrap();
        cat.add_source_label("Cardiovascular Disease", "MGMA").unwrap();
        let json = serde_json::to_string(&cat).expect("serialize category");
        let round: CanonicalCategory = serde_json::from_str(&json).expect("deserialize category");
        assert_eq!(round.standardized_name, "Cardiology");
        assert_eq!(round.kind, CategoryKind::Specialty);
        assert_eq!(round.source_labels.len(), 1);
    }

    #[test]
    fn incomplete_observation_detected() {
        let obs = MetricObservation {
            p25: 100.0,
            p50: 0.0,
            p75: 300.0,
            p90: 400.0,
            org_count: 10,
            incumbent_count: 50,
        };
        assert!(!obs.is_complete());
    }
}
