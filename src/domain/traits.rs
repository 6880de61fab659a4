// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to these traits rather than to
// concrete types:
//   - CsvLoader implements TableSource
//   - EpochLogger implements EpochCallback

use crate::domain::{error::DataError, table::Table};
use crate::infra::metrics::EpochMetrics;

// ─── TableSource ──────────────────────────────────────────────────────────────
/// Any component that can produce a labelled table.
pub trait TableSource {
    fn load(&self) -> Result<Table, DataError>;
}

// ─── EpochCallback ────────────────────────────────────────────────────────────
/// Hook invoked by the trainer after every epoch.
///
/// `epoch` is 0-based.
pub trait EpochCallback {
    fn on_epoch_end(&mut self, epoch: usize, metrics: &EpochMetrics);
}

/// A callback that ignores every epoch. Used for tuning trials.
pub struct Silent;

impl EpochCallback for Silent {
    fn on_epoch_end(&mut self, _epoch: usize, _metrics: &EpochMetrics) {}
}
