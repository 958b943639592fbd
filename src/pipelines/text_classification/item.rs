use derive_new::new;

use crate::{features::FeatureVector, labels::Label};

/// A vectorized, labeled example ready for batching
#[derive(Clone, Debug, new)]
pub struct Item {
    /// TF-IDF features of the cleaned text
    pub features: FeatureVector,

    /// The class of the example
    pub label: Label,
}
