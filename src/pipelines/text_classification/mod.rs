/// Classifier trait and predictions
pub mod model;

/// Batcher
pub mod batcher;

/// Text Classification Items
pub mod item;

/// Stratified train/test splitting
pub mod split;

/// Evaluation metrics
pub mod metrics;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use batcher::Batcher;
pub use inference::{load_artifacts, LogisticClassifier};
pub use item::Item;
pub use metrics::ClassificationReport;
pub use model::{Classifier, Prediction, NEUTRAL_CONFIDENCE};
pub use training::{train, Config as TrainingConfig, Report as TrainingReport};
