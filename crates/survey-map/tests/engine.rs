use survey_map::{AutoMapper, CategoryStore, MappingResolution, MappingSaver, NoopSaver};
use survey_model::{CanonicalCategory, CategoryKind, MapperConfig, UnmappedLabel};

fn cardiology_store() -> CategoryStore {
    let mut store = CategoryStore::new();
    store
        .confirm_mapping(CategoryKind::Specialty, "Cardiology", "CARDIOLOGY (GENERAL)", "MGMA")
        .unwrap();
    store
        .confirm_mapping(CategoryKind::Specialty, "Orthopedic Surgery", "Orthopedics", "MGMA")
        .unwrap();
    store
}

fn label(name: &str, vendor: &str) -> UnmappedLabel {
    UnmappedLabel::new(name, vendor).unwrap()
}

#[test]
fn synonym_backed_label_clears_floor() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let store = cardiology_store();

    let suggestions = mapper.suggest(
        &label("Cardiovascular Disease", "SullivanCotter"),
        CategoryKind::Specialty,
        &store,
    );

    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].standardized_name, "Cardiology");
    assert!(suggestions[0].confidence >= 0.8, "got {}", suggestions[0].confidence);
}

#[test]
fn exact_confirmed_label_scores_one() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let store = cardiology_store();

    let suggestions = mapper.suggest(
        &label("cardiology (general)", "AMGA"),
        CategoryKind::Specialty,
        &store,
    );
    assert_eq!(suggestions[0].standardized_name, "Cardiology");
    assert_eq!(suggestions[0].confidence, 1.0);
}

#[test]
fn display_floor_drops_weak_candidates() {
    let mapper = AutoMapper::new(MapperConfig {
        use_synonyms: false,
        ..MapperConfig::default()
    });
    let mut store = CategoryStore::new();
    // Letters agree, digits only on one side: scored by edit distance.
    // "abc" vs "abc1234567" = 1 - 7/10, right on the display floor.
    store
        .insert(CanonicalCategory::new("abc1234567", CategoryKind::Column).unwrap())
        .unwrap();
    // "abc" vs "abc12345678" = 1 - 8/11, just under it.
    store
        .insert(CanonicalCategory::new("abc12345678", CategoryKind::Column).unwrap())
        .unwrap();

    let suggestions = mapper.suggest(&label("abc", "MGMA"), CategoryKind::Column, &store);
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].standardized_name, "abc1234567");
}

#[test]
fn percentile_columns_never_cross_suggest() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let mut store = CategoryStore::new();
    store
        .insert(CanonicalCategory::new("tcc_p90", CategoryKind::Column).unwrap())
        .unwrap();

    let suggestions = mapper.suggest(&label("tcc_p50", "Gallagher"), CategoryKind::Column, &store);
    // The digit-run guard caps the score at 0.2, below the display floor.
    assert!(suggestions.is_empty());
}

#[test]
fn string_matching_toggle_disables_similarity() {
    let mapper = AutoMapper::new(MapperConfig {
        use_string_matching: false,
        use_synonyms: false,
        ..MapperConfig::default()
    });
    let store = cardiology_store();

    let suggestions = mapper.suggest(
        &label("cardiology (general)", "AMGA"),
        CategoryKind::Specialty,
        &store,
    );
    assert!(suggestions.is_empty());
}

#[test]
fn resolve_short_circuits_suggestions() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let store = cardiology_store();

    let resolution = mapper.resolve_or_suggest(
        &label("CARDIOLOGY (GENERAL)", "MGMA"),
        CategoryKind::Specialty,
        &store,
    );
    assert!(matches!(resolution, MappingResolution::Resolved(name) if name == "Cardiology"));

    let resolution = mapper.resolve_or_suggest(
        &label("CARDIOLOGY (GENERAL)", "ECG"),
        CategoryKind::Specialty,
        &store,
    );
    assert!(matches!(resolution, MappingResolution::Suggestions(_)));
}

#[test]
fn auto_map_all_applies_clearing_labels() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let mut store = cardiology_store();
    let labels = vec![
        label("Cardiovascular Disease", "SullivanCotter"),
        label("Plastic Surgery", "SullivanCotter"),
    ];

    let result = mapper.auto_map_all(&labels, CategoryKind::Specialty, &mut store, &NoopSaver);

    assert_eq!(result.applied.len(), 1);
    assert_eq!(result.applied[0].standardized_name, "Cardiology");
    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.unmatched[0].name, "Plastic Surgery");
    assert!(result.failures.is_empty());
    // The store now resolves the applied label directly.
    assert!(
        store
            .resolve(CategoryKind::Specialty, "Cardiovascular Disease", "SullivanCotter")
            .is_some()
    );
}

#[test]
fn batch_order_does_not_change_outcomes() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let l1 = label("Cardiovascular Disease", "SullivanCotter");
    let l2 = label("Heart and Vascular", "SullivanCotter");

    let mut store_a = cardiology_store();
    let forward = mapper.auto_map_all(
        &[l1.clone(), l2.clone()],
        CategoryKind::Specialty,
        &mut store_a,
        &NoopSaver,
    );
    let mut store_b = cardiology_store();
    let reverse =
        mapper.auto_map_all(&[l2, l1], CategoryKind::Specialty, &mut store_b, &NoopSaver);

    let outcome_for = |result: &survey_map::AutoMapResult, name: &str| {
        result
            .applied
            .iter()
            .find(|a| a.label.name == name)
            .map(|a| (a.standardized_name.clone(), a.confidence))
    };
    assert_eq!(
        outcome_for(&forward, "Cardiovascular Disease"),
        outcome_for(&reverse, "Cardiovascular Disease")
    );
    assert_eq!(
        outcome_for(&forward, "Heart and Vascular"),
        outcome_for(&reverse, "Heart and Vascular")
    );
}

struct FailingSaver {
    reject_name: String,
}

impl MappingSaver for FailingSaver {
    fn save_mapping(&self, category: &CanonicalCategory) -> anyhow::Result<()> {
        for source in &category.source_labels {
            if source.label == self.reject_name {
                anyhow::bail!("store unavailable");
            }
        }
        Ok(())
    }
}

#[test]
fn save_failure_is_isolated_to_one_label() {
    let mapper = AutoMapper::new(MapperConfig::default());
    let mut store = cardiology_store();
    let labels = vec![
        label("Cardiovascular Disease", "SullivanCotter"),
        label("Cardiac Care", "ECG"),
    ];
    let saver = FailingSaver {
        reject_name: "Cardiovascular Disease".to_string(),
    };

    let result = mapper.auto_map_all(&labels, CategoryKind::Specialty, &mut store, &saver);

    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].label.name, "Cardiovascular Disease");
    assert_eq!(result.applied.len(), 1);
    assert_eq!(result.applied[0].label.name, "Cardiac Care");
    // The failed label never reached the store.
    assert!(
        store
            .resolve(CategoryKind::Specialty, "Cardiovascular Disease", "SullivanCotter")
            .is_none()
    );
}
