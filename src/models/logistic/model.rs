use burn::{
    module::Module,
    nn::{loss::CrossEntropyLossConfig, Linear},
    tensor::{activation::softmax, backend::Backend, Int, Tensor},
    train::ClassificationOutput,
};

/// The registered name of this model, reported by the service metadata
pub static MODEL_NAME: &str = "LogisticRegression";

/// Multinomial logistic regression over TF-IDF features
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Linear decision function producing one logit per class
    pub output: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

impl<B: Backend> Model<B> {
    /// Defines forward pass for training
    pub fn forward(
        &self,
        features: Tensor<B, 2>,
        targets: Tensor<B, 1, Int>,
    ) -> ClassificationOutput<B> {
        let output = self.output.forward(features);

        let loss = CrossEntropyLossConfig::new()
            .init(&output.device())
            .forward(output.clone(), targets.clone());

        ClassificationOutput {
            loss,
            output,
            targets,
        }
    }

    /// Defines forward pass for inference, returning class probabilities
    pub fn infer(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.output.forward(features), 1)
    }
}

#[cfg(test)]
mod tests {
    use burn::{
        backend::NdArray,
        tensor::{Data, Shape},
    };

    use super::super::Config;
    use super::*;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_zero_initialized_model_is_uncertain() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(4, "test".to_string()).init(&device);

        let features = Tensor::<TestBackend, 2>::from_data(
            Data::new(vec![0.5_f32, 0.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0], Shape::new([2, 4])),
            &device,
        );
        let probabilities = model.infer(features);

        assert_eq!(probabilities.dims(), [2, 2]);
        for p in probabilities.into_data().value {
            assert!((p - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_forward_computes_loss() {
        let device = Default::default();
        let model: Model<TestBackend> = Config::new(3, "test".to_string()).init(&device);

        let features = Tensor::<TestBackend, 2>::zeros([2, 3], &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_data(
            Data::new(vec![0_i64, 1], Shape::new([2])),
            &device,
        );
        let output = model.forward(features, targets);

        assert_eq!(output.output.dims(), [2, 2]);
        let loss = output.loss.into_data().value[0];
        assert!((loss - 2.0_f32.ln()).abs() < 1e-5);
    }
}
