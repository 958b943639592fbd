use serde::{Deserialize, Serialize};

/// Parameters controlling vocabulary construction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Smallest and largest n-gram sizes, inclusive
    pub ngram_range: (usize, usize),

    /// Upper bound on the vocabulary size, keeping the most frequent terms across the corpus
    pub max_features: usize,
}

impl VectorizerParams {
    /// Create a new set of parameters
    pub fn new(ngram_range: (usize, usize), max_features: usize) -> Self {
        Self {
            ngram_range,
            max_features,
        }
    }

    /// Override the vocabulary cap
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: 10_000,
        }
    }
}
