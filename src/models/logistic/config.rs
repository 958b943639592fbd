use burn::{
    nn::{Initializer, LinearConfig},
    tensor::backend::Backend,
};

use super::Model;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// Size of the input feature vectors, equal to the vectorizer vocabulary size
    pub num_features: usize,

    /// Fingerprint of the vectorizer vocabulary the model was trained against
    pub vocabulary_fingerprint: String,

    /// Number of output classes
    #[config(default = 2)]
    pub n_classes: usize,
}

impl Config {
    /// Initializes a logistic regression model with zeroed weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let output = LinearConfig::new(self.num_features, self.n_classes)
            .with_initializer(Initializer::Zeros)
            .init(device);

        Model {
            output,
            n_classes: self.n_classes,
        }
    }
}
