// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV                  (Layer 4 - data)
//   Step 2: Stratified 80/20 split        (Layer 4 - data)
//   Step 3: Scale features, binarise      (Layer 4 - data)
//   Step 4: Optional random search        (Layer 5 - ml)
//   Step 5: Build the classifier          (Layer 5 - ml)
//   Step 6: Fit with epoch-end logging    (Layer 5 - ml, Layer 6 - infra)
//
// The trained model lives only in memory for the duration
// of the run.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    loader::CsvLoader,
    preprocessor::preprocess,
    splitter::{stratified_split, SPLIT_SEED, VALIDATION_FRACTION},
};
use crate::domain::{hyper_params::HyperParams, traits::TableSource};
use crate::infra::metrics::{EpochLogger, History};
use crate::ml::{
    model::DenseClassifierConfig,
    trainer::{fit, FitSettings},
    tuner::{SearchSpace, TuneSettings, Tuner},
    TrainBackend,
};

/// Seed for shuffling, weight initialisation and the random search
/// when determinism is requested.
const DETERMINISTIC_SEED: u64 = 42;

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:          String,
    pub epochs:             usize,
    pub batch_size:         usize,
    pub ensure_determinism: bool,
    pub tune:               bool,
    pub tune_epochs:        usize,
    pub max_trials:         usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:          String::new(),
            epochs:             30,
            batch_size:         32,
            ensure_determinism: false,
            tune:               false,
            tune_epochs:        5,
            max_trials:         10,
        }
    }
}

impl TrainConfig {
    /// Reject settings that would make training meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            bail!("--batch-size must be at least 1");
        }
        if self.tune && self.max_trials == 0 {
            bail!("--max-trials must be at least 1 when --tune is set");
        }
        if self.tune && self.tune_epochs == 0 {
            bail!("--tune-epochs must be at least 1 when --tune is set");
        }
        Ok(())
    }

    fn shuffle(&self) -> bool {
        !self.ensure_determinism
    }

    fn seed(&self) -> u64 {
        if self.ensure_determinism { DETERMINISTIC_SEED } else { rand::random() }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full pipeline end to end and return the final fit's history.
    pub fn execute(&self) -> Result<History> {
        let cfg = &self.config;

        // ── Step 1: Load ──────────────────────────────────────────────────────
        let table = CsvLoader::new(&cfg.data_path)
            .load()
            .with_context(|| format!("Cannot load training data from '{}'", cfg.data_path))?;

        // ── Step 2: Stratified split ──────────────────────────────────────────
        let split = stratified_split(&table.labels, VALIDATION_FRACTION, SPLIT_SEED)?;
        let train = table.select(&split.train);
        let val   = table.select(&split.val);
        tracing::info!("Split: {} train, {} validation", train.num_rows(), val.num_rows());

        // ── Step 3: Preprocess ────────────────────────────────────────────────
        let data = preprocess(&train, &val)?;
        tracing::info!(
            "{} input features, {} classes: {:?}",
            data.input_dim,
            data.num_classes,
            data.classes
        );

        let seed = cfg.seed();
        if cfg.ensure_determinism {
            crate::ml::seed_backend(seed);
        }

        // ── Step 4: Optional hyperparameter search ────────────────────────────
        let hp = if cfg.tune {
            let tuner = Tuner::new(
                SearchSpace::dense_default(),
                TuneSettings {
                    max_trials:  cfg.max_trials,
                    tune_epochs: cfg.tune_epochs,
                    batch_size:  cfg.batch_size,
                    shuffle:     cfg.shuffle(),
                    seed,
                },
            );
            let outcome = tuner.search(&data)?;
            tracing::info!("Random search finished after {} trials", outcome.trials.len());
            let best = outcome.best;

            println!("Best hyperparameters found:");
            println!("  units1: {}", best.units1);
            println!("  units2: {}", best.units2);
            println!("  learning_rate: {}\n", best.learning_rate);
            best
        } else {
            HyperParams::default()
        };

        // ── Step 5: Build the model ───────────────────────────────────────────
        let model_cfg = DenseClassifierConfig::from_hyper_params(data.input_dim, data.num_classes, &hp);
        let model     = model_cfg.init::<TrainBackend>(&crate::ml::device());
        print!("{}", model_cfg.summary());

        // ── Step 6: Fit ───────────────────────────────────────────────────────
        let settings = FitSettings {
            epochs:        cfg.epochs,
            batch_size:    cfg.batch_size,
            learning_rate: hp.learning_rate,
            shuffle:       cfg.shuffle(),
            seed,
        };
        let (_model, history) = fit(model, &data, &settings, &mut EpochLogger)?;

        tracing::info!("Training complete after {} epochs", history.len());
        Ok(history)
    }
}
