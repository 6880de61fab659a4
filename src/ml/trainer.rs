// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Manual train + validation loop with Burn's DataLoader and Adam.
//
//   - Training runs on TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on ValidBackend (NdArray)
//   - the validation batcher must also use ValidBackend
//   - argmax(1) returns [batch, 1] for both predictions and
//     one-hot targets, so they compare directly
//
// Reported loss/accuracy are averaged over rows, not batches,
// so a short last batch is weighted correctly.

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::data::{batcher::TabularBatcher, dataset::TabularDataset, preprocessor::Prepared};
use crate::domain::traits::EpochCallback;
use crate::infra::metrics::{EpochMetrics, History};
use crate::ml::{model::DenseClassifier, TrainBackend, ValidBackend};

/// Keras' Adam epsilon.
const ADAM_EPSILON: f32 = 1e-7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSettings {
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    /// Reshuffle the training rows every epoch.
    pub shuffle:       bool,
    /// Seed for the shuffling order.
    pub seed:          u64,
}

/// Train `model` on `data.train`, validating on `data.val` after every epoch.
pub fn fit<C: EpochCallback + ?Sized>(
    mut model: DenseClassifier<TrainBackend>,
    data:      &Prepared,
    settings:  &FitSettings,
    callback:  &mut C,
) -> Result<(DenseClassifier<TrainBackend>, History)> {
    if data.train.is_empty() {
        bail!("training split is empty");
    }
    if settings.batch_size == 0 {
        bail!("batch size must be at least 1");
    }

    let device = crate::ml::device();

    let mut optim = AdamConfig::new().with_epsilon(ADAM_EPSILON).init();

    // ── Training data loader (autodiff backend) ───────────────────────────────
    let train_batcher = TabularBatcher::<TrainBackend>::new(device.clone());
    let mut builder   = DataLoaderBuilder::new(train_batcher).batch_size(settings.batch_size);
    if settings.shuffle {
        builder = builder.shuffle(settings.seed);
    }
    let train_loader = builder.build(TabularDataset::new(data.train.clone()));

    // ── Validation data loader (inner backend, never shuffled) ────────────────
    let val_batcher = TabularBatcher::<ValidBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(settings.batch_size)
        .build(TabularDataset::new(data.val.clone()));

    let mut history = History::default();

    for epoch in 0..settings.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut loss_sum = 0.0f64;
        let mut correct  = 0usize;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            let rows = batch.targets.dims()[0];
            let (loss, logits) = model.forward_loss(batch.features, batch.targets.clone());

            loss_sum += loss.clone().into_scalar().elem::<f64>() * rows as f64;
            correct  += count_correct(logits, batch.targets);
            seen     += rows;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(settings.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_correct  = 0usize;
        let mut val_seen     = 0usize;

        for batch in val_loader.iter() {
            let rows = batch.targets.dims()[0];
            let (loss, logits) = model_valid.forward_loss(batch.features, batch.targets.clone());

            val_loss_sum += loss.into_scalar().elem::<f64>() * rows as f64;
            val_correct  += count_correct(logits, batch.targets);
            val_seen     += rows;
        }

        let metrics = EpochMetrics::new(
            ratio(loss_sum, seen),
            ratio(correct as f64, seen),
            ratio(val_loss_sum, val_seen),
            ratio(val_correct as f64, val_seen),
        );

        tracing::debug!("epoch {} finished: {:?}", epoch + 1, metrics);
        callback.on_epoch_end(epoch, &metrics);
        history.push(metrics);
    }

    Ok((model, history))
}

/// Rows whose highest logit matches the hot target entry.
fn count_correct<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 2>) -> usize {
    let hits: i64 = logits
        .argmax(1)
        .equal(targets.argmax(1))
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    hits.max(0) as usize
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::TabularSample;
    use crate::ml::model::DenseClassifierConfig;

    /// Two well separated blobs, already roughly standardised.
    fn blobs(n: usize) -> Vec<TabularSample> {
        (0..n)
            .map(|i| {
                let jitter = (i % 5) as f32 * 0.1;
                if i % 2 == 0 {
                    TabularSample { features: vec![-1.5 + jitter, -1.0 - jitter], target: vec![1.0, 0.0] }
                } else {
                    TabularSample { features: vec![1.5 - jitter, 1.0 + jitter], target: vec![0.0, 1.0] }
                }
            })
            .collect()
    }

    fn prepared() -> Prepared {
        Prepared {
            train:       blobs(32),
            val:         blobs(8),
            input_dim:   2,
            num_classes: 2,
            classes:     vec!["a".into(), "b".into()],
        }
    }

    struct Recorder(Vec<usize>);

    impl EpochCallback for Recorder {
        fn on_epoch_end(&mut self, epoch: usize, _metrics: &EpochMetrics) {
            self.0.push(epoch);
        }
    }

    #[test]
    fn test_fit_reports_every_epoch() {
        let _lock    = crate::ml::backend_lock();
        let data     = prepared();
        let model    = DenseClassifierConfig::new(2, 2).init::<TrainBackend>(&crate::ml::device());
        let settings = FitSettings { epochs: 4, batch_size: 5, learning_rate: 1e-2, shuffle: true, seed: 1 };
        let mut rec  = Recorder(Vec::new());

        let (_, history) = fit(model, &data, &settings, &mut rec).unwrap();

        assert_eq!(rec.0, vec![0, 1, 2, 3]);
        assert_eq!(history.len(), 4);
        for m in history.epochs() {
            assert!(m.loss.is_finite() && m.val_loss.is_finite());
            assert!((0.0..=1.0).contains(&m.accuracy));
            assert!((0.0..=1.0).contains(&m.val_accuracy));
        }
    }

    #[test]
    fn test_learns_separable_blobs() {
        let _lock = crate::ml::backend_lock();
        crate::ml::seed_backend(7);

        let data     = Prepared { train: blobs(64), val: blobs(16), ..prepared() };
        let model    = DenseClassifierConfig::new(2, 2).init::<TrainBackend>(&crate::ml::device());
        let settings = FitSettings { epochs: 60, batch_size: 8, learning_rate: 1e-2, shuffle: false, seed: 0 };

        let (_, history) = fit(model, &data, &settings, &mut crate::domain::traits::Silent).unwrap();
        let first = history.epochs()[0];
        let last  = *history.last().unwrap();

        assert!(last.val_accuracy >= 0.99, "val_accuracy {}", last.val_accuracy);
        assert!(last.loss < first.loss, "loss {} -> {}", first.loss, last.loss);
    }

    #[test]
    fn test_zero_epochs_is_empty_history() {
        let _lock    = crate::ml::backend_lock();
        let data     = prepared();
        let model    = DenseClassifierConfig::new(2, 2).init::<TrainBackend>(&crate::ml::device());
        let settings = FitSettings { epochs: 0, batch_size: 8, learning_rate: 1e-3, shuffle: false, seed: 0 };

        let (_, history) = fit(model, &data, &settings, &mut crate::domain::traits::Silent).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_count_correct() {
        let device  = Default::default();
        let logits  = Tensor::<ValidBackend, 2>::from_floats([[2.0, 1.0], [0.0, 3.0], [5.0, 1.0]], &device);
        let targets = Tensor::<ValidBackend, 2>::from_floats([[1.0, 0.0], [0.0, 1.0], [0.0, 1.0]], &device);
        assert_eq!(count_correct(logits, targets), 2);
    }
}
