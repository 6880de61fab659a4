use serde::{Deserialize, Serialize};

/// Tunable hyperparameters of the dense classifier:
/// the widths of the first two hidden layers and the Adam learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HyperParams {
    pub units1:        usize,
    pub units2:        usize,
    pub learning_rate: f64,
}

impl Default for HyperParams {
    /// The untuned topology: 30/20 hidden units, learning rate 1e-4.
    fn default() -> Self {
        Self {
            units1:        30,
            units2:        20,
            learning_rate: 1e-4,
        }
    }
}
