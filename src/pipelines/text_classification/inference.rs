use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use burn::{
    config::Config as _,
    data::dataloader::batcher::Batcher as _,
    module::Module,
    record::{CompactRecorder, Recorder},
    tensor::{backend::Backend, Tensor},
};
use log::info;

use crate::{
    artifacts::{ensure_exists, ArtifactError, ArtifactPaths},
    features::{FeatureVector, TfidfVectorizer},
    labels::Label,
    models::logistic::{self, MODEL_NAME},
};

use super::{Batcher, Classifier, Prediction};

/// A fitted logistic regression classifier running on a Burn backend. Burn modules are `Send` but
/// not `Sync`, so the model sits behind a mutex to be shared across request handlers.
pub struct LogisticClassifier<B: Backend> {
    model: Mutex<logistic::Model<B>>,
    config: logistic::Config,
    batcher: Batcher<B>,
}

impl<B: Backend> LogisticClassifier<B> {
    /// Wrap a fitted model
    pub fn new(model: logistic::Model<B>, config: logistic::Config, device: B::Device) -> Self {
        let batcher = Batcher::new(config.num_features, device);

        Self {
            model: Mutex::new(model),
            config,
            batcher,
        }
    }

    fn model(&self) -> MutexGuard<'_, logistic::Model<B>> {
        // Inference never leaves the model half-updated, so a poisoned lock is still usable
        self.model.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Load the model config and weights from an artifact directory
    pub fn load(device: B::Device, artifact_dir: &Path) -> Result<Self, ArtifactError> {
        let paths = ArtifactPaths::new(artifact_dir);

        // Load experiment configuration
        let config_path = paths.model_config();
        ensure_exists(&config_path)?;
        let config =
            logistic::Config::load(&config_path).map_err(|e| ArtifactError::Model {
                path: config_path.clone(),
                message: e.to_string(),
            })?;

        // Load trained model weights
        let record_path = paths.model_record();
        ensure_exists(&record_path)?;
        let record = CompactRecorder::new()
            .load(paths.model(), &device)
            .map_err(|e| ArtifactError::Model {
                path: record_path.clone(),
                message: e.to_string(),
            })?;

        let model = config.init::<B>(&device).load_record(record);

        info!(
            "Loaded {} with {} features from {}",
            MODEL_NAME,
            config.num_features,
            artifact_dir.display()
        );

        Ok(Self::new(model, config, device))
    }

    /// Save the model config and weights into an artifact directory
    pub fn save(&self, artifact_dir: &Path) -> Result<(), ArtifactError> {
        let paths = ArtifactPaths::new(artifact_dir);

        self.config
            .save(paths.model_config())
            .map_err(|source| ArtifactError::Io {
                path: paths.model_config(),
                source,
            })?;

        CompactRecorder::new()
            .record(self.model().clone().into_record(), paths.model())
            .map_err(|e| ArtifactError::Model {
                path: paths.model_record(),
                message: e.to_string(),
            })
    }

    /// The model configuration
    pub fn config(&self) -> &logistic::Config {
        &self.config
    }

    /// Class probabilities for a batch, `[batch_size, n_classes]`
    pub fn probabilities(&self, features: &[FeatureVector]) -> Tensor<B, 2> {
        let input = self.batcher.batch(features.to_vec());

        self.model().infer(input)
    }
}

impl<B: Backend> Classifier for LogisticClassifier<B> {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn num_features(&self) -> usize {
        self.config.num_features
    }

    fn predict_batch(&self, features: &[FeatureVector]) -> Vec<Prediction> {
        if features.is_empty() {
            return Vec::new();
        }

        let probabilities = self
            .probabilities(features)
            .into_data()
            .convert::<f32>()
            .value;

        probabilities
            .chunks(self.config.n_classes)
            .map(|row| {
                let (reliable, unreliable) = (row[0], row[1]);
                let label = if unreliable > reliable {
                    Label::Unreliable
                } else {
                    Label::Reliable
                };

                Prediction::new(label, Some([reliable, unreliable]))
            })
            .collect()
    }
}

/// Load the fitted vectorizer and classifier, refusing a vectorizer that was not fitted together
/// with the classifier
pub fn load_artifacts<B: Backend>(
    device: B::Device,
    artifact_dir: &Path,
) -> Result<(TfidfVectorizer, LogisticClassifier<B>), ArtifactError> {
    let paths = ArtifactPaths::new(artifact_dir);

    let vectorizer = TfidfVectorizer::load(&paths.vectorizer())?;
    let classifier = LogisticClassifier::<B>::load(device, artifact_dir)?;

    let config = classifier.config();
    let fingerprint = vectorizer.fingerprint();

    if config.num_features != vectorizer.num_features()
        || config.vocabulary_fingerprint != fingerprint
    {
        return Err(ArtifactError::Mismatch {
            expected: config.num_features,
            expected_fingerprint: config.vocabulary_fingerprint.clone(),
            found: vectorizer.num_features(),
            found_fingerprint: fingerprint,
        });
    }

    Ok((vectorizer, classifier))
}
