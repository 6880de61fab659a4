// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Flags are parsed with
// clap and handed to the application layer as a TrainConfig.
// There is a single command: train a classifier on a CSV file,
// optionally running a hyperparameter search first.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::TrainArgs;

use crate::application::train_use_case::{TrainConfig, TrainUseCase};

/// Train a dense neural network classifier on a labelled CSV file.
#[derive(Parser, Debug)]
#[command(
    name = "dense-classifier",
    version,
    about = "Train a DNN classifier on tabular CSV data, with optional hyperparameter search."
)]
pub struct Cli {
    #[command(flatten)]
    pub train: TrainArgs,
}

impl Cli {
    /// Convert the flags into a TrainConfig and run the pipeline.
    pub fn run(self) -> Result<()> {
        let config: TrainConfig = self.train.into();
        config.validate()?;

        tracing::info!("Training on '{}'", config.data_path);
        TrainUseCase::new(config).execute()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dense-classifier", "--data-path", "data.csv"]).unwrap();
        let cfg: TrainConfig = cli.train.into();

        assert_eq!(cfg.data_path, "data.csv");
        assert_eq!(cfg.epochs, 30);
        assert_eq!(cfg.batch_size, 32);
        assert!(!cfg.ensure_determinism);
        assert!(!cfg.tune);
        assert_eq!(cfg.tune_epochs, 5);
        assert_eq!(cfg.max_trials, 10);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "dense-classifier",
            "--data-path", "x.csv",
            "--epochs", "3",
            "--batch-size", "8",
            "--ensure-determinism",
            "--tune",
            "--tune-epochs", "2",
            "--max-trials", "4",
        ])
        .unwrap();
        let cfg: TrainConfig = cli.train.into();

        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.batch_size, 8);
        assert!(cfg.ensure_determinism);
        assert!(cfg.tune);
        assert_eq!(cfg.tune_epochs, 2);
        assert_eq!(cfg.max_trials, 4);
    }

    #[test]
    fn test_data_path_is_required() {
        assert!(Cli::try_parse_from(["dense-classifier"]).is_err());
    }
}
