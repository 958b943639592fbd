use std::path::Path;

use burn::{
    config::Config as _,
    data::{dataloader::DataLoaderBuilder, dataset::InMemDataset},
    module::AutodiffModule,
    optim::{decay::WeightDecayConfig, AdamConfig},
    record::CompactRecorder,
    tensor::backend::AutodiffBackend,
    train::{
        metric::{AccuracyMetric, LossMetric},
        LearnerBuilder,
    },
    LearningRate,
};
use log::{info, warn};

use crate::{
    artifacts::ArtifactPaths,
    datasets::news,
    features::{FeatureVector, TfidfVectorizer, VectorizerParams},
    labels::Label,
    models::logistic,
    preprocessing,
    utils::renderer::Simple,
};

use super::{
    metrics::ClassificationReport, split::stratified_split, Batcher, Classifier, Item,
    LogisticClassifier,
};

/// Define configuration struct for the experiment
#[derive(burn::config::Config)]
pub struct Config {
    /// Batch size
    #[config(default = 64)]
    pub batch_size: usize,

    /// Maximum number of passes over the training split
    #[config(default = 10)]
    pub num_epochs: usize,

    /// Learning rate for Adam
    #[config(default = 1e-2)]
    pub learning_rate: LearningRate,

    /// L2 penalty on the weights
    #[config(default = 1e-6)]
    pub weight_decay: f64,

    /// Seed for the split, the shuffling and the backend
    #[config(default = 42)]
    pub seed: u64,

    /// Fraction of each class held out for evaluation
    #[config(default = 0.2)]
    pub test_fraction: f64,

    /// Upper bound on the vectorizer vocabulary size
    #[config(default = 10_000)]
    pub max_features: usize,

    /// Data loader worker threads
    #[config(default = 1)]
    pub num_workers: usize,
}

/// A summary of a completed training run
#[derive(Clone, Debug)]
pub struct Report {
    /// Examples loaded from the sources
    pub samples: usize,

    /// Examples dropped because normalization left no tokens
    pub dropped: usize,

    /// Size of the training split
    pub train_size: usize,

    /// Size of the held-out split
    pub test_size: usize,

    /// Vectorizer vocabulary size
    pub num_features: usize,

    /// Held-out evaluation
    pub evaluation: ClassificationReport,
}

/// Normalize texts and drop the ones that end up empty
pub fn prepare(items: Vec<news::Item>) -> (Vec<String>, Vec<Label>) {
    items
        .into_iter()
        .map(|item| (preprocessing::normalize(&item.text), item.label))
        .filter(|(cleaned, _)| !cleaned.is_empty())
        .unzip()
}

/// Define train function
pub fn train<B: AutodiffBackend>(
    device: B::Device,  // Device on which to perform computation (e.g., CPU or CUDA device)
    items: Vec<news::Item>, // Labeled examples, as loaded
    config: Config,     // Experiment configuration
    artifact_dir: &Path, // Directory to save model, vectorizer and config files
    use_tui: bool,      // Render progress in a terminal UI instead of the log
) -> anyhow::Result<Report> {
    std::fs::create_dir_all(artifact_dir)?;
    let paths = ArtifactPaths::new(artifact_dir);

    B::seed(config.seed);

    let samples = items.len();
    let (texts, labels) = prepare(items);
    let dropped = samples - texts.len();

    if dropped > 0 {
        warn!("Dropped {} samples that were empty after preprocessing", dropped);
    }

    for class in Label::ALL {
        if !labels.contains(&class) {
            return Err(anyhow!("No {} samples left after preprocessing", class));
        }
    }

    // Fit the vectorizer on every cleaned text, then split the vectors
    let params = VectorizerParams::default().with_max_features(config.max_features);
    let (vectorizer, features) = TfidfVectorizer::fit_transform(&texts, params);

    info!("Vectorized {} texts into {} features", texts.len(), vectorizer.num_features());

    let (train_indices, test_indices) =
        stratified_split(&labels, config.test_fraction, config.seed);

    let to_items = |indices: &[usize]| {
        indices
            .iter()
            .map(|&i| Item::new(features[i].clone(), labels[i]))
            .collect::<Vec<_>>()
    };
    let train_items = to_items(&train_indices);
    let test_items = to_items(&test_indices);

    if train_items.is_empty() || test_items.is_empty() {
        return Err(anyhow!(
            "Not enough samples to split: {} train, {} test",
            train_items.len(),
            test_items.len()
        ));
    }

    let model_config = logistic::Config::new(vectorizer.num_features(), vectorizer.fingerprint());
    let model = model_config.init::<B>(&device);

    // Initialize batchers for training and testing data
    let batcher_train = Batcher::<B>::new(model_config.num_features, device.clone());
    let batcher_test = Batcher::<B::InnerBackend>::new(model_config.num_features, device.clone());

    // Initialize data loaders for training and testing data
    let dataloader_train = DataLoaderBuilder::new(batcher_train)
        .batch_size(config.batch_size)
        .shuffle(config.seed)
        .num_workers(config.num_workers)
        .build(InMemDataset::new(train_items));

    let dataloader_test = DataLoaderBuilder::new(batcher_test)
        .batch_size(config.batch_size)
        .num_workers(config.num_workers)
        .build(InMemDataset::new(test_items.clone()));

    // Initialize optimizer
    let optimizer = AdamConfig::new()
        .with_weight_decay(Some(WeightDecayConfig::new(config.weight_decay)))
        .init();

    // Initialize learner
    let mut builder = LearnerBuilder::new(&paths.learner().to_string_lossy())
        .metric_train_numeric(AccuracyMetric::new())
        .metric_valid_numeric(AccuracyMetric::new())
        .metric_train_numeric(LossMetric::new())
        .metric_valid_numeric(LossMetric::new())
        .with_file_checkpointer(CompactRecorder::new())
        .devices(vec![device.clone()])
        .num_epochs(config.num_epochs)
        .summary();

    if !use_tui {
        builder = builder.renderer(Simple::new());
    }

    let learner = builder.build(model, optimizer, config.learning_rate);

    // Train the model
    let model_trained = learner.fit(dataloader_train, dataloader_test);

    // Evaluate on the held-out split
    let classifier = LogisticClassifier::<B::InnerBackend>::new(
        model_trained.valid(),
        model_config,
        device,
    );

    let test_features = test_items
        .iter()
        .map(|item| item.features.clone())
        .collect::<Vec<FeatureVector>>();
    let predicted = test_features
        .chunks(config.batch_size.max(1))
        .flat_map(|chunk| classifier.predict_batch(chunk))
        .map(|prediction| prediction.label)
        .collect::<Vec<_>>();
    let actual = test_items.iter().map(|item| item.label).collect::<Vec<_>>();

    let evaluation = ClassificationReport::new(&actual, &predicted);

    info!("Accuracy: {:.4}", evaluation.accuracy);
    info!("Classification report:\n{}", evaluation);

    // Save the configuration, the vectorizer and the trained model
    vectorizer.save(&paths.vectorizer())?;
    classifier.save(artifact_dir)?;
    config.save(paths.training_config())?;

    info!(
        "Saved: {}, {}, {}",
        paths.model_record().display(),
        paths.model_config().display(),
        paths.vectorizer().display()
    );

    Ok(Report {
        samples,
        dropped,
        train_size: train_indices.len(),
        test_size: test_indices.len(),
        num_features: vectorizer.num_features(),
        evaluation,
    })
}
