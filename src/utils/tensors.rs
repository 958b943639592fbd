use burn::tensor::{backend::Backend, Data, ElementConversion, Int, Shape, Tensor};

use crate::features::FeatureVector;

/// Scatter sparse feature vectors into a dense `[rows, num_features]` float tensor
pub fn dense_rows<B: Backend>(
    rows: &[FeatureVector],
    num_features: usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    let batch_size = rows.len();
    let mut values = vec![0.0_f32; batch_size * num_features];

    for (index, row) in rows.iter().enumerate() {
        for (column, value) in row.iter().filter(|(column, _)| *column < num_features) {
            values[index * num_features + column] = value;
        }
    }

    Tensor::from_data(
        Data::<B::FloatElem, 2>::new(
            values.into_iter().map(|v| v.elem()).collect(),
            Shape::new([batch_size, num_features]),
        ),
        device,
    )
}

/// Build a 1-D integer tensor of class ids
pub fn class_ids<B: Backend>(ids: &[usize], device: &B::Device) -> Tensor<B, 1, Int> {
    Tensor::from_data(
        Data::<B::IntElem, 1>::new(
            ids.iter().map(|id| (*id as i64).elem()).collect(),
            Shape::new([ids.len()]),
        ),
        device,
    )
}
