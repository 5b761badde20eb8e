/// Label Resolver
///
/// Maps the classifier's best guess to a craft route identifier.
///
/// | classifier label      | identifier            |
/// |-----------------------|-----------------------|
/// | Channapatna Toys      | channapatna           |
/// | Jaipur Blue Pottery   | blue-pottery          |
/// | Warli Art             | warli                 |
/// | Kolam Art             | kolam                 |
/// | Madhubani Art         | madhubani             |
/// | Background            | no match              |
/// | anything else         | fallback (channapatna)|
///
/// Unknown labels resolve to the fallback rather than failing. This is the
/// demo behavior the exported model was paired with; keep it unless the model
/// and the table are changed together.
use common::CraftId;

use crate::types::ClassificationResult;

/// The model's negative class.
pub const BACKGROUND_LABEL: &str = "Background";

/// Exact class names exported with the model.
pub const CRAFT_LABELS: [(&str, CraftId); 5] = [
    ("Channapatna Toys", CraftId::Channapatna),
    ("Jaipur Blue Pottery", CraftId::BluePottery),
    ("Warli Art", CraftId::Warli),
    ("Kolam Art", CraftId::Kolam),
    ("Madhubani Art", CraftId::Madhubani),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelResolver {
    negative_label: String,
    fallback: CraftId,
}

impl Default for LabelResolver {
    fn default() -> Self {
        Self {
            negative_label: BACKGROUND_LABEL.to_string(),
            fallback: CraftId::Channapatna,
        }
    }
}

impl LabelResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier returned for labels missing from the table.
    pub fn with_fallback(mut self, fallback: CraftId) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_negative_label(mut self, label: impl Into<String>) -> Self {
        self.negative_label = label.into();
        self
    }

    pub fn fallback(&self) -> CraftId {
        self.fallback
    }

    /// Resolve the top prediction. `None` for an empty result or the negative class.
    pub fn resolve(&self, result: &ClassificationResult) -> Option<CraftId> {
        let top = result.top()?;
        self.resolve_label(&top.label)
    }

    /// Resolve a single class name.
    pub fn resolve_label(&self, label: &str) -> Option<CraftId> {
        if label == self.negative_label {
            return None;
        }

        let mapped = CRAFT_LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, id)| *id);

        match mapped {
            Some(id) => Some(id),
            None => {
                tracing::debug!("Label '{}' is not in the craft table, using fallback {}", label, self.fallback);
                Some(self.fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Prediction;

    fn result(entries: &[(&str, f32)]) -> ClassificationResult {
        entries.iter().map(|(l, p)| Prediction::new(*l, *p)).collect()
    }

    #[test]
    fn test_table_is_exact() {
        let resolver = LabelResolver::new();
        assert_eq!(resolver.resolve_label("Channapatna Toys"), Some(CraftId::Channapatna));
        assert_eq!(resolver.resolve_label("Jaipur Blue Pottery"), Some(CraftId::BluePottery));
        assert_eq!(resolver.resolve_label("Warli Art"), Some(CraftId::Warli));
        assert_eq!(resolver.resolve_label("Kolam Art"), Some(CraftId::Kolam));
        assert_eq!(resolver.resolve_label("Madhubani Art"), Some(CraftId::Madhubani));
        assert_eq!(resolver.resolve_label("Background"), None);
    }

    #[test]
    fn test_background_is_no_match() {
        let resolver = LabelResolver::new();
        assert_eq!(resolver.resolve(&result(&[("Background", 0.99)])), None);
    }

    #[test]
    fn test_empty_is_no_match() {
        assert_eq!(LabelResolver::new().resolve(&ClassificationResult::default()), None);
    }

    #[test]
    fn test_highest_probability_wins() {
        let resolver = LabelResolver::new();
        assert_eq!(
            resolver.resolve(&result(&[("Kolam Art", 0.4), ("Warli Art", 0.6)])),
            Some(CraftId::Warli)
        );
    }

    #[test]
    fn test_unmapped_label_falls_back() {
        let resolver = LabelResolver::new();
        assert_eq!(resolver.resolve(&result(&[("Unmapped Thing", 1.0)])), Some(CraftId::Channapatna));

        let resolver = LabelResolver::new().with_fallback(CraftId::Kolam);
        assert_eq!(resolver.resolve(&result(&[("Unmapped Thing", 1.0)])), Some(CraftId::Kolam));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let resolver = LabelResolver::new();
        assert_eq!(resolver.resolve_label("warli art"), Some(CraftId::Channapatna));
        assert_eq!(resolver.resolve_label("background"), Some(CraftId::Channapatna));
    }

    #[test]
    fn test_custom_negative_label() {
        let resolver = LabelResolver::new().with_negative_label("Nothing");
        assert_eq!(resolver.resolve_label("Nothing"), None);
        assert_eq!(resolver.resolve_label("Background"), Some(CraftId::Channapatna));
    }
}
