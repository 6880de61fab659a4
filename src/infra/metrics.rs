// ============================================================
// Layer 6 — Epoch Metrics and Logger
// ============================================================
// Metrics recorded per epoch:
//   - loss:         mean training loss (cross-entropy + L1 activity penalty)
//   - accuracy:     fraction of training rows classified correctly
//   - val_loss:     mean loss on the validation split
//   - val_accuracy: fraction of validation rows classified correctly
//
// EpochLogger prints one line per epoch to stdout:
//   Epoch 01: loss=0.6931, acc=0.5000; val_loss=0.6900, val_acc=0.5500
//
// Nothing is written to disk.

use crate::domain::traits::EpochCallback;

/// Metrics for a single training epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochMetrics {
    pub loss:         f64,
    pub accuracy:     f64,
    pub val_loss:     f64,
    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(loss: f64, accuracy: f64, val_loss: f64, val_accuracy: f64) -> Self {
        Self { loss, accuracy, val_loss, val_accuracy }
    }
}

/// Ordered per-epoch metrics of one fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    epochs: Vec<EpochMetrics>,
}

impl History {
    pub fn push(&mut self, m: EpochMetrics) {
        self.epochs.push(m);
    }

    pub fn epochs(&self) -> &[EpochMetrics] {
        &self.epochs
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    /// Highest validation accuracy over all epochs (NaN-free).
    pub fn best_val_accuracy(&self) -> Option<f64> {
        self.epochs
            .iter()
            .map(|m| m.val_accuracy)
            .filter(|v| !v.is_nan())
            .fold(None, |best, v| Some(best.map_or(v, |b: f64| b.max(v))))
    }
}

/// Render the per-epoch line. `epoch` is 0-based.
pub fn format_epoch_line(epoch: usize, m: &EpochMetrics) -> String {
    format!(
        "Epoch {:02}: loss={:.4}, acc={:.4}; val_loss={:.4}, val_acc={:.4}",
        epoch + 1,
        m.loss,
        m.accuracy,
        m.val_loss,
        m.val_accuracy,
    )
}

/// Prints every epoch's metrics to stdout.
#[derive(Debug, Default)]
pub struct EpochLogger;

impl EpochCallback for EpochLogger {
    fn on_epoch_end(&mut self, epoch: usize, metrics: &EpochMetrics) {
        println!("{}", format_epoch_line(epoch, metrics));
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_line_format() {
        let m = EpochMetrics::new(0.693147, 0.5, 0.69, 0.55);
        assert_eq!(
            format_epoch_line(0, &m),
            "Epoch 01: loss=0.6931, acc=0.5000; val_loss=0.6900, val_acc=0.5500"
        );
        assert!(format_epoch_line(99, &m).starts_with("Epoch 100:"));
    }

    #[test]
    fn test_best_val_accuracy() {
        let mut h = History::default();
        assert_eq!(h.best_val_accuracy(), None);

        h.push(EpochMetrics::new(1.0, 0.4, 1.0, 0.30));
        h.push(EpochMetrics::new(0.8, 0.6, 0.9, 0.70));
        h.push(EpochMetrics::new(0.7, 0.7, 0.9, f64::NAN));
        h.push(EpochMetrics::new(0.6, 0.8, 1.1, 0.65));

        assert_eq!(h.best_val_accuracy(), Some(0.70));
        assert_eq!(h.len(), 4);
    }
}
