// ============================================================
// Layer 5 — Random Hyperparameter Search
// ============================================================
// Search space:
//   units1        ∈ {16, 32, 48, 64}
//   units2        ∈ {8, 16, 24, 32}
//   learning_rate ∈ {1e-2, 1e-3, 1e-4}
//
// Each trial samples a configuration not tried before, builds
// a fresh model from it, trains for `tune_epochs` epochs, and
// is scored by the best validation accuracy of any epoch.
// The search ends after `max_trials` trials, or earlier when
// every configuration in the space has been tried.

use anyhow::{bail, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::data::preprocessor::Prepared;
use crate::domain::{hyper_params::HyperParams, traits::Silent};
use crate::ml::{
    model::DenseClassifierConfig,
    trainer::{fit, FitSettings},
    TrainBackend,
};

/// Consecutive duplicate samples tolerated before giving up.
const MAX_COLLISIONS: usize = 100;

// ─── Search space ─────────────────────────────────────────────────────────────
/// Domain of a single hyperparameter.
#[derive(Debug, Clone, PartialEq)]
pub enum HyperParameter {
    /// min, min + step, ..., up to and including max
    Int { min: usize, max: usize, step: usize },
    Choice(Vec<f64>),
}

impl HyperParameter {
    /// Number of distinct values.
    pub fn cardinality(&self) -> usize {
        match self {
            HyperParameter::Int { min, max, step } if *step > 0 && max >= min => {
                (max - min) / step + 1
            }
            HyperParameter::Int { .. } => 1,
            HyperParameter::Choice(values) => values.len(),
        }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match self {
            HyperParameter::Int { min, step, .. } => {
                let k = rng.gen_range(0..self.cardinality());
                (min + step * k) as f64
            }
            HyperParameter::Choice(values) => values[rng.gen_range(0..values.len())],
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match self {
            HyperParameter::Int { min, max, step } => {
                let v = value as usize;
                v as f64 == value && v >= *min && v <= *max && (v - min) % (*step).max(1) == 0
            }
            HyperParameter::Choice(values) => values.contains(&value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    pub units1:        HyperParameter,
    pub units2:        HyperParameter,
    pub learning_rate: HyperParameter,
}

impl SearchSpace {
    /// Widths of the first two layers and the learning rate.
    pub fn dense_default() -> Self {
        Self {
            units1:        HyperParameter::Int { min: 16, max: 64, step: 16 },
            units2:        HyperParameter::Int { min: 8, max: 32, step: 8 },
            learning_rate: HyperParameter::Choice(vec![1e-2, 1e-3, 1e-4]),
        }
    }

    pub fn size(&self) -> usize {
        self.units1.cardinality() * self.units2.cardinality() * self.learning_rate.cardinality()
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> HyperParams {
        HyperParams {
            units1:        self.units1.sample(rng) as usize,
            units2:        self.units2.sample(rng) as usize,
            learning_rate: self.learning_rate.sample(rng),
        }
    }

    pub fn contains(&self, hp: &HyperParams) -> bool {
        self.units1.contains(hp.units1 as f64)
            && self.units2.contains(hp.units2 as f64)
            && self.learning_rate.contains(hp.learning_rate)
    }
}

// ─── RandomSearch ─────────────────────────────────────────────────────────────
/// Proposes distinct configurations drawn uniformly from a [`SearchSpace`].
pub struct RandomSearch {
    space:      SearchSpace,
    max_trials: usize,
    rng:        StdRng,
    tried:      Vec<HyperParams>,
}

impl RandomSearch {
    pub fn new(space: SearchSpace, max_trials: usize, seed: u64) -> Self {
        Self {
            space,
            max_trials,
            rng: StdRng::seed_from_u64(seed),
            tried: Vec::new(),
        }
    }

    /// Next untried configuration, or `None` when the budget or the space is used up.
    pub fn suggest(&mut self) -> Option<HyperParams> {
        if self.tried.len() >= self.max_trials || self.tried.len() >= self.space.size() {
            return None;
        }
        for _ in 0..MAX_COLLISIONS {
            let hp = self.space.sample(&mut self.rng);
            debug_assert!(self.space.contains(&hp), "{hp:?} sampled outside the space");
            if !self.tried.contains(&hp) {
                self.tried.push(hp);
                return Some(hp);
            }
        }
        tracing::warn!("Random search stopped after {MAX_COLLISIONS} duplicate samples");
        None
    }
}

// ─── Tuner ────────────────────────────────────────────────────────────────────
/// One finished trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub hyper_params: HyperParams,
    /// Best validation accuracy over the trial's epochs.
    pub score:        f64,
}

#[derive(Debug, Clone)]
pub struct TuningOutcome {
    pub best:   HyperParams,
    pub trials: Vec<Trial>,
}

#[derive(Debug, Clone, Copy)]
pub struct TuneSettings {
    pub max_trials:  usize,
    pub tune_epochs: usize,
    pub batch_size:  usize,
    pub shuffle:     bool,
    pub seed:        u64,
}

pub struct Tuner {
    space:    SearchSpace,
    settings: TuneSettings,
}

impl Tuner {
    pub fn new(space: SearchSpace, settings: TuneSettings) -> Self {
        Self { space, settings }
    }

    /// Run every trial and return the configuration with the highest score.
    /// On a tie the earlier trial wins.
    pub fn search(&self, data: &Prepared) -> Result<TuningOutcome> {
        let s          = &self.settings;
        let device     = crate::ml::device();
        let mut search = RandomSearch::new(self.space.clone(), s.max_trials, s.seed);
        let mut trials: Vec<Trial> = Vec::new();

        while let Some(hp) = search.suggest() {
            let model = DenseClassifierConfig::from_hyper_params(data.input_dim, data.num_classes, &hp)
                .init::<TrainBackend>(&device);
            let fit_settings = FitSettings {
                epochs:        s.tune_epochs,
                batch_size:    s.batch_size,
                learning_rate: hp.learning_rate,
                shuffle:       s.shuffle,
                seed:          s.seed,
            };

            let (_, history) = fit(model, data, &fit_settings, &mut Silent)?;
            let trial = Trial {
                hyper_params: hp,
                score:        history.best_val_accuracy().unwrap_or(f64::NAN),
            };

            trials.push(trial);
            let best = pick_best(&trials);

            println!(
                "Trial {:02} complete: units1={}, units2={}, learning_rate={} | val_acc={:.4} | best so far={:.4}",
                trials.len(),
                hp.units1,
                hp.units2,
                hp.learning_rate,
                trial.score,
                best.map_or(f64::NAN, |b| b.score),
            );
        }

        match pick_best(&trials) {
            Some(b) => Ok(TuningOutcome { best: b.hyper_params, trials }),
            None if trials.is_empty() => bail!("hyperparameter search ran no trials"),
            None => bail!("no trial produced a validation accuracy"),
        }
    }
}

/// Highest-scoring trial. Earlier trials win ties and NaN scores never win.
fn pick_best(trials: &[Trial]) -> Option<Trial> {
    trials
        .iter()
        .filter(|t| !t.score.is_nan())
        .fold(None, |best: Option<Trial>, t| match best {
            Some(b) if b.score >= t.score => Some(b),
            _ => Some(*t),
        })
}
