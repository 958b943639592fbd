use std::path::{Path, PathBuf};

/// Base name of the classifier weights record (the recorder appends its own extension)
pub static MODEL_FILE: &str = "model";

/// Classifier configuration, saved next to the weights
pub static MODEL_CONFIG_FILE: &str = "config.json";

/// Fitted vectorizer
pub static VECTORIZER_FILE: &str = "vector.json";

/// Training hyperparameters used to produce the artifacts
pub static TRAINING_CONFIG_FILE: &str = "training.json";

/// Subdirectory for the learner's checkpoints and metric logs
pub static LEARNER_DIR: &str = "learner";

/// Paths of every artifact under an artifact directory
#[derive(Clone, Debug)]
pub struct ArtifactPaths {
    /// The artifact directory itself
    pub dir: PathBuf,
}

impl ArtifactPaths {
    /// Resolve artifact paths under the given directory
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Classifier weights, without the recorder extension
    pub fn model(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Classifier weights as written by the compact recorder
    pub fn model_record(&self) -> PathBuf {
        self.dir.join(format!("{MODEL_FILE}.mpk"))
    }

    /// Classifier config
    pub fn model_config(&self) -> PathBuf {
        self.dir.join(MODEL_CONFIG_FILE)
    }

    /// Vectorizer
    pub fn vectorizer(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    /// Training config
    pub fn training_config(&self) -> PathBuf {
        self.dir.join(TRAINING_CONFIG_FILE)
    }

    /// Learner checkpoints and metric logs, kept apart from the served artifacts
    pub fn learner(&self) -> PathBuf {
        self.dir.join(LEARNER_DIR)
    }
}

/// Errors raised while reading or writing fitted artifacts
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    /// An artifact file does not exist
    #[error("artifact not found: {0}")]
    Missing(PathBuf),

    /// Filesystem failure
    #[error("unable to access artifact {path}: {source}")]
    Io {
        /// The artifact path
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// The vectorizer file is not valid JSON for a fitted vectorizer
    #[error("unable to decode artifact {path}: {source}")]
    Json {
        /// The artifact path
        path: PathBuf,
        /// The underlying error
        source: serde_json::Error,
    },

    /// Burn config or record failure
    #[error("unable to load model artifact {path}: {message}")]
    Model {
        /// The artifact path
        path: PathBuf,
        /// Description from burn
        message: String,
    },

    /// The vectorizer does not belong to the classifier
    #[error(
        "vectorizer does not match the classifier: classifier expects {expected} features \
         (vocabulary {expected_fingerprint}), vectorizer has {found} (vocabulary {found_fingerprint})"
    )]
    Mismatch {
        /// Feature count recorded in the classifier config
        expected: usize,
        /// Vocabulary fingerprint recorded in the classifier config
        expected_fingerprint: String,
        /// Feature count of the loaded vectorizer
        found: usize,
        /// Vocabulary fingerprint of the loaded vectorizer
        found_fingerprint: String,
    },
}

/// Fail with [`ArtifactError::Missing`] unless the path exists
pub fn ensure_exists(path: &Path) -> Result<(), ArtifactError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ArtifactError::Missing(path.to_path_buf()))
    }
}
