// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// All configurable flags of the train command.
// clap's derive macros generate --help text, missing-argument
// errors and string → number conversion.

use clap::Args;
use crate::application::train_use_case::TrainConfig;

/// All arguments for training.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Path to CSV with a 'label' column + numeric features
    #[arg(long)]
    pub data_path: String,

    /// Number of training epochs for the final model
    #[arg(long, default_value_t = 30)]
    pub epochs: usize,

    /// Batch size for training
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Disable dataset shuffling and seed all randomness
    #[arg(long)]
    pub ensure_determinism: bool,

    /// Run hyperparameter tuning before final training
    #[arg(long)]
    pub tune: bool,

    /// Epochs for each trial during tuning
    #[arg(long, default_value_t = 5)]
    pub tune_epochs: usize,

    /// Number of hyperparameter trials
    #[arg(long, default_value_t = 10)]
    pub max_trials: usize,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:          a.data_path,
            epochs:             a.epochs,
            batch_size:         a.batch_size,
            ensure_determinism: a.ensure_determinism,
            tune:               a.tune,
            tune_epochs:        a.tune_epochs,
            max_trials:         a.max_trials,
        }
    }
}
