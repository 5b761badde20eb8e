//! Property tests for the label resolver's selection rule.

use common::CraftId;
use lens_pipeline::{ClassificationResult, LabelResolver, Prediction, CRAFT_LABELS};
use proptest::prelude::*;

fn label_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..CRAFT_LABELS.len()).prop_map(|i| CRAFT_LABELS[i].0.to_string()),
        Just("Background".to_string()),
        "[a-z]{1,8}",
    ]
}

fn expected_for(label: &str) -> Option<CraftId> {
    if label == "Background" {
        return None;
    }
    Some(
        CRAFT_LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, id)| *id)
            .unwrap_or(CraftId::Channapatna),
    )
}

proptest! {
    #[test]
    fn resolves_the_earliest_maximum(
        entries in prop::collection::vec((label_strategy(), 0u8..=10), 1..12)
    ) {
        let result: ClassificationResult = entries
            .iter()
            .map(|(label, p)| Prediction::new(label.clone(), *p as f32 / 10.0))
            .collect();

        let max = entries.iter().map(|(_, p)| *p).max().unwrap();
        let winner = &entries.iter().find(|(_, p)| *p == max).unwrap().0;

        prop_assert_eq!(LabelResolver::new().resolve(&result), expected_for(winner));
    }
}
