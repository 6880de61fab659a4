// ============================================================
// Layer 4 — Tabular Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<TabularSample>
// into two dense tensors:
//
//   Input:  N samples, each with F features and C target slots
//   Output: features [N, F], targets [N, C]
//
// Every row already has the same width (the scaler and the
// binarizer guarantee it), so the rows are simply flattened
// in order and reshaped.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::TabularSample;

/// A batch of scaled features and one-hot targets.
#[derive(Debug, Clone)]
pub struct TabularBatch<B: Backend> {
    /// shape: [batch_size, input_dim]
    pub features: Tensor<B, 2>,

    /// shape: [batch_size, num_classes]
    pub targets: Tensor<B, 2>,
}

/// Holds the target device so tensors are created in the right place.
#[derive(Clone, Debug)]
pub struct TabularBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TabularBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TabularSample, TabularBatch<B>> for TabularBatcher<B> {
    fn batch(&self, items: Vec<TabularSample>) -> TabularBatch<B> {
        let batch_size  = items.len();
        let input_dim   = items.first().map_or(0, |s| s.features.len());
        let num_classes = items.first().map_or(0, |s| s.target.len());

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let targets_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(features_flat, [batch_size, input_dim]),
            &self.device,
        );
        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets_flat, [batch_size, num_classes]),
            &self.device,
        );

        TabularBatch { features, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_order() {
        let batcher = TabularBatcher::<NdArray>::new(Default::default());
        let batch = batcher.batch(vec![
            TabularSample { features: vec![1.0, 2.0, 3.0], target: vec![1.0, 0.0] },
            TabularSample { features: vec![4.0, 5.0, 6.0], target: vec![0.0, 1.0] },
        ]);

        assert_eq!(batch.features.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2, 2]);

        let row1: Vec<f32> = batch
            .features
            .slice([1..2, 0..3])
            .into_data()
            .to_vec()
            .unwrap();
        assert_eq!(row1, vec![4.0, 5.0, 6.0]);
    }
}
