//! Rubric fixture tests: the bundled rubric agrees with the scoring weights.

use introscore::rubric::load_rubric;
use introscore::Criterion;
use std::path::Path;

#[test]
fn bundled_rubric_matches_engine_weights() {
    let rubric = load_rubric(Path::new("test-data/rubric.csv")).unwrap();
    assert_eq!(rubric.entries.len(), Criterion::ALL.len());
    assert_eq!(rubric.total_weight(), 100.0);
    assert!(rubric.discrepancies().is_empty());

    for entry in &rubric.entries {
        let criterion = Criterion::from_label(&entry.criterion)
            .unwrap_or_else(|| panic!("unknown criterion {:?}", entry.criterion));
        assert_eq!(entry.weight, criterion.weight());
        assert!(entry.description.is_some());
        assert!(entry.extras.contains_key("metric"));
    }
}
