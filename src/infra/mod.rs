// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by more than one layer:
//
//   metrics.rs — per-epoch metrics, the fit History, and the
//                stdout EpochLogger callback used by the
//                trainer after every epoch.

/// Epoch metrics, history, and the epoch-end logger
pub mod metrics;
