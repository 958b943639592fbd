use derive_new::new;

use crate::{features::FeatureVector, labels::Label};

/// Confidence reported when a classifier exposes no probability estimate
pub const NEUTRAL_CONFIDENCE: f32 = 0.5;

/// The outcome of classifying a single feature vector
#[derive(Clone, Copy, Debug, PartialEq, new)]
pub struct Prediction {
    /// The predicted class
    pub label: Label,

    /// Class probabilities indexed by class id, when the classifier provides them
    pub probabilities: Option<[f32; 2]>,
}

impl Prediction {
    /// The maximum class probability, or [`NEUTRAL_CONFIDENCE`] without probability estimates
    pub fn confidence(&self) -> f32 {
        self.probabilities
            .map(|probabilities| probabilities[0].max(probabilities[1]).clamp(0.0, 1.0))
            .unwrap_or(NEUTRAL_CONFIDENCE)
    }
}

/// A fitted classifier mapping feature vectors to labels
pub trait Classifier: Send + Sync {
    /// The type name of the model, reported by the service metadata
    fn name(&self) -> &str;

    /// The input dimension the classifier was fitted on
    fn num_features(&self) -> usize;

    /// Classify a batch of feature vectors.
    ///
    /// Implementations must return exactly one prediction per input row, in input order.
    fn predict_batch(&self, features: &[FeatureVector]) -> Vec<Prediction>;

    /// Classify a single feature vector
    fn predict(&self, features: &FeatureVector) -> Prediction {
        let predictions = self.predict_batch(std::slice::from_ref(features));

        debug_assert_eq!(
            predictions.len(),
            1,
            "{} must return one prediction per row",
            self.name()
        );

        predictions
            .into_iter()
            .next()
            .unwrap_or(Prediction::new(Label::Reliable, None))
    }
}
