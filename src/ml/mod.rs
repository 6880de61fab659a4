// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn nn/optim code lives here.
//
//   model.rs   — the five-layer dense classifier, its Config,
//                the activity-regularised loss and the
//                Keras-style summary table
//
//   trainer.rs — the fit loop: forward, loss, backward, Adam
//                step, validation pass, epoch-end callback
//
//   tuner.rs   — random search over layer widths and
//                learning rate, scored by validation accuracy

use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};

/// The dense classifier and its configuration
pub mod model;

/// Training loop with validation and epoch callbacks
pub mod trainer;

/// Random hyperparameter search
pub mod tuner;

/// Backend used for training (tracks gradients).
pub type TrainBackend = Autodiff<NdArray>;

/// Backend used for validation (no autodiff overhead).
pub type ValidBackend = NdArray;

pub fn device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// Seed the backend RNG used for weight initialisation.
pub fn seed_backend(seed: u64) {
    use burn::tensor::backend::Backend;
    TrainBackend::seed(seed);
}

/// Serialises tests that draw weights from the shared backend RNG, so a
/// seeded run is not interleaved with another test's initialisation.
#[cfg(test)]
pub(crate) fn backend_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
