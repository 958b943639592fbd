use std::{collections::BTreeMap, path::Path, time::Instant};

use burn::backend::{ndarray::NdArrayDevice, NdArray};
use log::debug;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    artifacts::ArtifactError,
    features::TfidfVectorizer,
    labels::Label,
    pipelines::text_classification::{load_artifacts, Classifier},
    preprocessing,
};

use super::ApiError;

/// Body of `POST /predict`
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    /// The news text to classify
    #[validate(length(min = 10, max = 20000))]
    pub text: String,
}

/// Response of `POST /predict`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// The predicted class id
    pub prediction: usize,

    /// The predicted class name
    pub label: String,

    /// Maximum class probability
    pub confidence: f32,

    /// Time spent handling the request, in milliseconds
    pub ms: u64,
}

/// Response of `GET /meta`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetaResponse {
    /// Classifier type name
    pub model: String,

    /// Vectorizer type name
    pub vectorizer: String,

    /// Class id to class name
    pub labels: BTreeMap<String, String>,
}

/// Process-wide, read-only state shared by every request: the fitted vectorizer and classifier.
/// Built once at startup and dropped at shutdown.
pub struct AppContext {
    vectorizer: TfidfVectorizer,
    classifier: Box<dyn Classifier>,
}

impl AppContext {
    /// Build a context from fitted components
    pub fn new(vectorizer: TfidfVectorizer, classifier: Box<dyn Classifier>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Load the fitted artifacts from a directory onto the CPU backend
    pub fn load(artifact_dir: &Path) -> Result<Self, ArtifactError> {
        let (vectorizer, classifier) =
            load_artifacts::<NdArray<f32>>(NdArrayDevice::Cpu, artifact_dir)?;

        Ok(Self::new(vectorizer, Box::new(classifier)))
    }

    /// Validate, normalize, vectorize and classify a request
    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        let started = Instant::now();

        request.validate()?;

        let cleaned = preprocessing::normalize(&request.text);
        if cleaned.trim().is_empty() {
            return Err(ApiError::EmptyAfterPreprocessing);
        }

        let features = self.vectorizer.transform(&cleaned);
        let prediction = self.classifier.predict(&features);

        let ms = started.elapsed().as_millis() as u64;

        debug!(
            "Predicted {} ({:.4}) from {} features in {}ms",
            prediction.label,
            prediction.confidence(),
            features.nnz(),
            ms
        );

        Ok(PredictResponse {
            prediction: prediction.label.id(),
            label: prediction.label.to_string(),
            confidence: prediction.confidence(),
            ms,
        })
    }

    /// Describe the loaded model
    pub fn meta(&self) -> MetaResponse {
        MetaResponse {
            model: self.classifier.name().to_string(),
            vectorizer: TfidfVectorizer::NAME.to_string(),
            labels: Label::id2label(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use burn::backend::NdArray;

    use crate::{
        features::{FeatureVector, VectorizerParams},
        models::logistic,
        pipelines::text_classification::{LogisticClassifier, Prediction},
    };

    use super::*;

    /// A classifier without probability estimates that flags every text as unreliable
    pub(crate) struct AlwaysUnreliable;

    impl Classifier for AlwaysUnreliable {
        fn name(&self) -> &str {
            "AlwaysUnreliable"
        }

        fn num_features(&self) -> usize {
            0
        }

        fn predict_batch(&self, features: &[FeatureVector]) -> Vec<Prediction> {
            features
                .iter()
                .map(|_| Prediction::new(Label::Unreliable, None))
                .collect()
        }
    }

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::fit(
            &[
                "senat pass budget bill offici said",
                "shock alien secret control senat insid reveal",
            ],
            VectorizerParams::default(),
        )
    }

    /// A context backed by an untrained logistic regression
    pub(crate) fn logistic_context() -> AppContext {
        let vectorizer = vectorizer();
        let device = Default::default();
        let config = logistic::Config::new(vectorizer.num_features(), vectorizer.fingerprint());
        let model = config.init::<NdArray<f32>>(&device);

        AppContext::new(
            vectorizer,
            Box::new(LogisticClassifier::new(model, config, device)),
        )
    }

    fn request(text: &str) -> PredictRequest {
        PredictRequest {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_predict_returns_consistent_response() {
        let context = logistic_context();

        let response = context
            .predict(&request("SHOCKING: aliens secretly control the senate, insiders reveal!"))
            .unwrap();

        assert!(response.prediction <= 1);
        assert_eq!(
            response.label,
            Label::try_from(response.prediction).unwrap().to_string()
        );
        assert!((0.0..=1.0).contains(&response.confidence));
    }

    #[test]
    fn test_predict_rejects_short_text() {
        let context = logistic_context();

        let result = context.predict(&request("too short"));

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_predict_rejects_long_text() {
        let context = logistic_context();

        let result = context.predict(&request(&"a".repeat(20_001)));

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn test_predict_rejects_text_empty_after_preprocessing() {
        let context = logistic_context();

        let result = context.predict(&request("the the the!!!"));

        assert!(matches!(result, Err(ApiError::EmptyAfterPreprocessing)));
    }

    #[test]
    fn test_confidence_defaults_without_probabilities() {
        let context = AppContext::new(vectorizer(), Box::new(AlwaysUnreliable));

        let response = context
            .predict(&request("Senators passed the budget bill"))
            .unwrap();

        assert_eq!(response.prediction, 1);
        assert_eq!(response.label, "Unreliable");
        assert_eq!(response.confidence, 0.5);
    }

    #[test]
    fn test_meta() {
        let meta = logistic_context().meta();

        assert_eq!(meta.model, "LogisticRegression");
        assert_eq!(meta.vectorizer, "TfidfVectorizer");
        assert_eq!(meta.labels, Label::id2label());
    }

    #[test]
    fn test_load_fails_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();

        assert!(AppContext::load(dir.path()).is_err());
    }
}
