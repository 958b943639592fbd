use burn::{
    data::dataloader,
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;

use crate::{features::FeatureVector, utils::tensors};

use super::Item;

/// Struct for training batch for text classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Dense feature rows, `[batch_size, num_features]`
    pub features: Tensor<B, 2>,

    /// Class ids for the batch
    pub targets: Tensor<B, 1, Int>,
}

/// Struct for batching text classification items
#[derive(Clone, new)]
pub struct Batcher<B: Backend> {
    /// Width of each dense feature row
    num_features: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    device: B::Device,
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<FeatureVector, Tensor<B, 2>> for Batcher<B> {
    /// Batches sparse feature vectors into a dense input tensor
    fn batch(&self, items: Vec<FeatureVector>) -> Tensor<B, 2> {
        tensors::dense_rows(&items, self.num_features, &self.device)
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend> dataloader::batcher::Batcher<Item, Train<B>> for Batcher<B> {
    /// Batches a vector of text classification items into a training batch
    fn batch(&self, items: Vec<Item>) -> Train<B> {
        let class_ids = items.iter().map(|item| item.label.id()).collect::<Vec<_>>();
        let rows = items.into_iter().map(|item| item.features).collect::<Vec<_>>();

        Train {
            features: tensors::dense_rows(&rows, self.num_features, &self.device),
            targets: tensors::class_ids(&class_ids, &self.device),
        }
    }
}
