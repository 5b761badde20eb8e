/// Classifier output types.
///
/// A `ClassificationResult` is consumed immediately by the label resolver; it
/// is never persisted. Order matters: it decides ties.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Class name as exported with the model (`className` in TF.js output)
    #[serde(alias = "className")]
    pub label: String,

    /// Probability in [0, 1]
    pub probability: f32,
}

impl Prediction {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationResult(Vec<Prediction>);

impl ClassificationResult {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self(predictions)
    }

    /// Pair labels with the model's per-class output, in label order.
    pub fn from_scores(labels: &[String], scores: &[f32]) -> Self {
        Self(
            labels
                .iter()
                .zip(scores)
                .map(|(label, score)| Prediction::new(label.clone(), *score))
                .collect(),
        )
    }

    /// Entry with the strictly greatest probability.
    ///
    /// Ties go to the entry seen first. NaN never wins. `None` when the result
    /// is empty or every probability is NaN.
    pub fn top(&self) -> Option<&Prediction> {
        let mut best: Option<&Prediction> = None;
        for prediction in &self.0 {
            if prediction.probability.is_nan() {
                continue;
            }
            match best {
                Some(current) if prediction.probability <= current.probability => {}
                _ => best = Some(prediction),
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.0.iter()
    }
}

impl From<Vec<Prediction>> for ClassificationResult {
    fn from(predictions: Vec<Prediction>) -> Self {
        Self(predictions)
    }
}

impl FromIterator<Prediction> for ClassificationResult {
    fn from_iter<I: IntoIterator<Item = Prediction>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
